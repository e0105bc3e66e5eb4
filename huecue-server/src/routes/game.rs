//! Live tournament feed
//!
//! Each request starts its own tournament and streams every event as one SSE
//! `data:` line. Closing the connection cancels the run.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use huecue_tournament::{rounds_from_request, run_tournament, RunOutcome, TournamentConfig};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::state::ServerState;

const EVENT_BUFFER: usize = 64;

#[derive(Deserialize)]
pub struct GameParams {
    pub rounds: Option<String>,
}

/// Start a tournament and stream its events
pub async fn stream_game(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<GameParams>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let config = TournamentConfig {
        total_rounds: rounds_from_request(params.rounds.as_deref()),
        pacing: state.pacing(),
        ..Default::default()
    };

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let cancel = CancellationToken::new();
    // Dropped with the response stream when the client goes away
    let guard = cancel.clone().drop_guard();

    tracing::info!(rounds = config.total_rounds, "game stream opened");

    tokio::spawn(async move {
        let outcome = run_tournament(state.provider(), state.roster(), &config, tx, cancel).await;
        match outcome {
            RunOutcome::Completed(summary) => tracing::info!(
                winner = summary.winner().map(|w| w.agent.id.as_str()),
                rounds_played = summary.rounds_played,
                "game stream finished"
            ),
            RunOutcome::Cancelled { rounds_finished } => {
                tracing::info!(rounds_finished, "game stream closed by client")
            }
        }
    });

    let stream = ReceiverStream::new(rx).map(move |event| {
        let _guard = &guard;
        Event::default().json_data(&event)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
