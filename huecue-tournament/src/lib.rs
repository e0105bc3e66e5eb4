//! HueCue Tournament - Rounds of clue giving and guessing between models
//!
//! This crate provides tournament infrastructure:
//! - Roster of agents and role rotation
//! - Completion-provider seam and an OpenAI-compatible gateway client
//! - Round orchestration with an ordered event feed
//! - Cumulative scoring and ranking
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_tournament (orchestration)
//! - Level 2: play_round (phases)
//! - Level 3: request_clue, collect_guess, score_round (steps)
//! - Level 4: suspension points, utilities, configuration

mod agents;
mod completion;
mod config;
mod events;
mod gateway;
mod orchestrator;
mod prompts;
mod scoreboard;

pub use agents::{Agent, Roster, RosterError};
pub use completion::{CompletionError, CompletionProvider};
pub use config::{
    clamp_rounds, rounds_from_request, PacingConfig, TargetPool, TournamentConfig,
    DEFAULT_ROUNDS, MAX_ROUNDS, MIN_ROUNDS, PLACEHOLDER_CLUE,
};
pub use events::{PlacedGuess, ScoredGuess, TournamentEvent};
pub use gateway::{GatewayClient, GatewayConfig};
pub use orchestrator::{
    clue_giver_bonus, run_tournament, RoundOutcome, RoundResult, RunOutcome, TournamentSummary,
    PARSE_FAILURE,
};
pub use prompts::{clue_giver_prompt, guesser_prompt};
pub use scoreboard::{RankingEntry, ScoreSnapshot, Scoreboard};
