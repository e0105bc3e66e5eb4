//! HueCue Server - HTTP API for the tournament visualizer
//!
//! This crate provides the web backend:
//! - REST API for board geometry, scoring zones, and colour difference
//! - Live tournament feed as Server-Sent Events
//! - Static file serving for the visualizer

mod routes;
mod state;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use state::ServerState;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8003,
            static_dir: "huecue/visualizer".to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Board geometry and colours
        .route("/api/board", get(routes::board::get_board))
        .route("/api/zones/:coordinate", get(routes::zones::get_zones))
        .route("/api/delta-e", get(routes::delta_e::get_delta_e))
        // Live tournament feed
        .route("/api/game", get(routes::game::stream_game))
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig, state: ServerState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let agents = state.roster().len();
    let router = create_router(&config, Arc::new(state));

    tracing::info!("HueCue server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);
    tracing::info!("Roster: {} agents", agents);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
