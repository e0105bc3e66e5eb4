//! HueCue CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the visualizer server with the live game feed
//! - play: Run a tournament in the terminal
//! - board: Inspect the colour board
//! - delta-e: Compare two colours

mod board_cmd;
mod delta_e_cmd;
mod gateway;
mod play;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "huecue")]
#[command(about = "Colour-clue tournament between language models")]
#[command(version)]
struct Cli {
    /// Random seed for reproducible target selection
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start visualizer server
    Serve(server::ServerArgs),
    /// Play a tournament and print the event feed
    Play(play::PlayArgs),
    /// Show the board or a single cell
    Board(board_cmd::BoardArgs),
    /// Perceptual difference between two colours
    DeltaE(delta_e_cmd::DeltaEArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `play --json` keeps stdout for events
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Board(args) => board_cmd::run(args),
        Commands::DeltaE(args) => delta_e_cmd::run(args),
    }
}
