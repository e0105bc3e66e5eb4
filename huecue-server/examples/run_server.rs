//! Example to run the HueCue server standalone
//!
//! Run with: cargo run -p huecue-server --example run_server
//!
//! Set HUECUE_GATEWAY_URL and HUECUE_API_KEY to point at an OpenAI-compatible
//! gateway.

use std::sync::Arc;

use huecue_server::{run_server, ServerConfig, ServerState};
use huecue_tournament::{GatewayClient, GatewayConfig, Roster};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let base_url = std::env::var("HUECUE_GATEWAY_URL")
        .unwrap_or_else(|_| GatewayConfig::default().base_url);
    let mut gateway = GatewayConfig::new(&base_url);
    if let Ok(key) = std::env::var("HUECUE_API_KEY") {
        gateway = gateway.with_api_key(key);
    }

    let provider = GatewayClient::new(gateway)?;
    let state = ServerState::new(Arc::new(provider), Roster::default_roster());

    let config = ServerConfig {
        port: 8003,
        static_dir: "huecue/visualizer".to_string(),
    };

    println!("Starting HueCue server on port {}", config.port);
    println!("Static files from: {}", config.static_dir);
    println!("Open http://localhost:{}/api/game to watch a tournament", config.port);

    run_server(config, state).await
}
