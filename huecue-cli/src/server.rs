//! Server command - start the web visualizer server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), build_state(), start_server()
//! - Level 3: (delegated to huecue-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use huecue_server::{run_server, ServerConfig, ServerState};

use crate::gateway::GatewayArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8003")]
    pub port: u16,

    /// Directory containing static files for the visualizer
    #[arg(long, default_value = "huecue/visualizer")]
    pub static_dir: PathBuf,

    #[command(flatten)]
    pub gateway: GatewayArgs,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server
/// 2. Build the shared state (roster and gateway)
/// 3. Start server (blocking)
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;
    let state = build_state(&args.gateway)?;

    tracing::info!(
        "Starting HueCue server on port {} (gateway {})",
        config.port,
        args.gateway.gateway_url
    );

    start_server(config, state)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
    })
}

/// Roster and completion backend shared by every game request
fn build_state(gateway: &GatewayArgs) -> Result<ServerState> {
    let roster = gateway.load_roster()?;
    let provider = gateway.build_provider()?;
    Ok(ServerState::new(Arc::new(provider), roster))
}

/// Start the server (blocking)
fn start_server(config: ServerConfig, state: ServerState) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config, state).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate that static directory exists
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but may not serve files.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
