//! Play command - run a tournament and print its event feed
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_tournament(), play_tournament(), report_outcome()
//! - Level 3: print_event(), watch_for_interrupt()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use huecue_core::parse_coordinate;
use huecue_tournament::{
    run_tournament, CompletionProvider, PacingConfig, RankingEntry, Roster, RunOutcome,
    TournamentConfig, TournamentEvent, DEFAULT_ROUNDS,
};

use crate::gateway::GatewayArgs;

const EVENT_BUFFER: usize = 64;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Number of rounds (clamped to 4..=24)
    #[arg(long, default_value_t = DEFAULT_ROUNDS as i64)]
    pub rounds: i64,

    /// Restrict targets to these cells (repeatable, e.g. --target K12)
    #[arg(long = "target", value_name = "CELL")]
    pub targets: Vec<String>,

    /// Skip the pauses between phases
    #[arg(long)]
    pub no_pacing: bool,

    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Load roster and gateway
/// 2. Play the tournament, printing events as they arrive
/// 3. Report the outcome
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let roster = args.gateway.load_roster()?;
    let provider = args.gateway.build_provider()?;
    let config = configure_tournament(&args, seed)?;

    tracing::info!(
        "Starting tournament: {} agents, {} rounds",
        roster.len(),
        config.total_rounds
    );

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(play_tournament(&provider, &roster, &config, args.json))?;

    if !args.json {
        report_outcome(&outcome);
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Tournament config from command arguments
fn configure_tournament(args: &PlayArgs, seed: Option<u64>) -> Result<TournamentConfig> {
    let mut config = TournamentConfig::with_rounds(args.rounds);

    if args.no_pacing {
        config = config.with_pacing(PacingConfig::none());
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if !args.targets.is_empty() {
        let cells = args
            .targets
            .iter()
            .map(|t| parse_coordinate(t).with_context(|| format!("Invalid target cell: {t}")))
            .collect::<Result<Vec<_>>>()?;
        config = config.with_targets(cells);
    }

    Ok(config)
}

/// Run the tournament and print events until it ends or Ctrl-C
async fn play_tournament<P>(
    provider: &P,
    roster: &Roster,
    config: &TournamentConfig,
    json: bool,
) -> Result<RunOutcome>
where
    P: CompletionProvider + ?Sized,
{
    let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);
    let cancel = CancellationToken::new();
    let interrupt = watch_for_interrupt(cancel.clone());

    let printer = async move {
        while let Some(event) = rx.recv().await {
            print_event(&event, json)?;
        }
        Ok::<(), anyhow::Error>(())
    };

    let (outcome, printed) =
        tokio::join!(run_tournament(provider, roster, config, tx, cancel), printer);
    interrupt.abort();
    printed?;

    Ok(outcome)
}

/// Final summary for terminal output
fn report_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Completed(summary) => {
            println!(
                "\n{} rounds played, {} skipped",
                summary.rounds_played, summary.rounds_skipped
            );
            if let Some(winner) = summary.winner() {
                println!("Winner: {} with {} points", winner.agent.name, winner.score);
            }
        }
        RunOutcome::Cancelled { rounds_finished } => {
            println!("\nTournament stopped after {rounds_finished} rounds");
        }
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Cancel the run on Ctrl-C
fn watch_for_interrupt(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping tournament");
            cancel.cancel();
        }
    })
}

fn print_event(event: &TournamentEvent, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    } else if let Some(line) = format_event(event) {
        println!("{line}");
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

/// Human-readable line for an event; thinking markers print nothing
fn format_event(event: &TournamentEvent) -> Option<String> {
    match event {
        TournamentEvent::TournamentInit {
            total_rounds,
            agents,
            ..
        } => {
            let names: Vec<_> = agents.iter().map(|a| a.name.as_str()).collect();
            Some(format!(
                "=== HueCue: {} rounds, {} ===",
                total_rounds,
                names.join(", ")
            ))
        }
        TournamentEvent::RoundStart {
            round,
            clue_giver,
            target,
            target_color,
            ..
        } => Some(format!(
            "\nRound {round}: {} gives a clue for {target} ({target_color})",
            clue_giver.name
        )),
        TournamentEvent::ClueReady { clue, .. } => Some(format!("  Clue: {clue}")),
        TournamentEvent::ClueFailed { error, .. } => {
            Some(format!("  Clue failed ({error}), round skipped"))
        }
        TournamentEvent::GuessPlaced { guess, .. } => Some(match (&guess.coordinate, &guess.error) {
            (Some(cell), _) => format!("  {} -> {cell} ({} ms)", guess.agent_id, guess.latency_ms),
            (None, Some(error)) => format!("  {} -> no guess ({error})", guess.agent_id),
            (None, None) => format!("  {} -> no guess", guess.agent_id),
        }),
        TournamentEvent::RoundComplete {
            clue_giver,
            bonus,
            guesses,
            ..
        } => {
            let mut lines: Vec<String> = guesses
                .iter()
                .map(|g| format!("  {:<24} +{} {}", g.guess.agent_id, g.score, g.zone.label()))
                .collect();
            lines.push(format!("  {:<24} +{bonus} clue bonus", clue_giver.id));
            Some(lines.join("\n"))
        }
        TournamentEvent::TournamentComplete { rankings, .. } => {
            Some(format!("\n=== Final standings ===\n{}", format_rankings(rankings)))
        }
        TournamentEvent::ClueThinking { .. }
        | TournamentEvent::GuessThinking { .. }
        | TournamentEvent::RevealScoring { .. } => None,
    }
}

fn format_rankings(rankings: &[RankingEntry]) -> String {
    rankings
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>2}. {:<24} {:>3}", i + 1, entry.agent.name, entry.score))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// TESTS
// ============================================================================
