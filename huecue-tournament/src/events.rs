//! The ordered event feed emitted by a tournament run
//!
//! Events serialize as JSON objects tagged by `type`. Round numbers are
//! 1-based on the wire.

use huecue_core::{Color, Coordinate, ScoreResult, Zone};
use serde::Serialize;

use crate::agents::Agent;
use crate::scoreboard::{RankingEntry, ScoreSnapshot};

/// A guess as placed on the board, before scoring
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlacedGuess {
    pub agent_id: String,
    pub agent_color: Color,
    pub coordinate: Option<Coordinate>,
    pub color: Option<Color>,
    pub reasoning: Option<String>,
    pub error: Option<String>,
    pub latency_ms: u64,
}

/// A guess after the target has been revealed
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoredGuess {
    #[serde(flatten)]
    pub guess: PlacedGuess,
    pub score: u32,
    pub zone: Zone,
    pub distance: Option<u32>,
}

impl ScoredGuess {
    pub fn new(guess: PlacedGuess, result: ScoreResult) -> Self {
        Self {
            guess,
            score: result.score,
            zone: result.zone,
            distance: result.distance,
        }
    }
}

/// Everything an observer can see happen during a tournament
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TournamentEvent {
    TournamentInit {
        total_rounds: usize,
        agents: Vec<Agent>,
        scores: ScoreSnapshot,
    },
    RoundStart {
        round: usize,
        clue_giver: Agent,
        guessers: Vec<Agent>,
        target: Coordinate,
        target_color: Color,
    },
    ClueThinking {
        round: usize,
    },
    ClueReady {
        round: usize,
        clue: String,
        reasoning: Option<String>,
    },
    ClueFailed {
        round: usize,
        error: String,
    },
    GuessThinking {
        round: usize,
        agent_id: String,
    },
    GuessPlaced {
        round: usize,
        guess: PlacedGuess,
    },
    RevealScoring {
        round: usize,
        target: Coordinate,
    },
    RoundComplete {
        round: usize,
        clue_giver: Agent,
        bonus: u32,
        guesses: Vec<ScoredGuess>,
        scores: ScoreSnapshot,
    },
    TournamentComplete {
        rankings: Vec<RankingEntry>,
        scores: ScoreSnapshot,
    },
}

impl TournamentEvent {
    /// Wire name of the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            TournamentEvent::TournamentInit { .. } => "tournament_init",
            TournamentEvent::RoundStart { .. } => "round_start",
            TournamentEvent::ClueThinking { .. } => "clue_thinking",
            TournamentEvent::ClueReady { .. } => "clue_ready",
            TournamentEvent::ClueFailed { .. } => "clue_failed",
            TournamentEvent::GuessThinking { .. } => "guess_thinking",
            TournamentEvent::GuessPlaced { .. } => "guess_placed",
            TournamentEvent::RevealScoring { .. } => "reveal_scoring",
            TournamentEvent::RoundComplete { .. } => "round_complete",
            TournamentEvent::TournamentComplete { .. } => "tournament_complete",
        }
    }

    /// 1-based round number, for round-scoped events
    pub fn round(&self) -> Option<usize> {
        match self {
            TournamentEvent::RoundStart { round, .. }
            | TournamentEvent::ClueThinking { round }
            | TournamentEvent::ClueReady { round, .. }
            | TournamentEvent::ClueFailed { round, .. }
            | TournamentEvent::GuessThinking { round, .. }
            | TournamentEvent::GuessPlaced { round, .. }
            | TournamentEvent::RevealScoring { round, .. }
            | TournamentEvent::RoundComplete { round, .. } => Some(*round),
            TournamentEvent::TournamentInit { .. } | TournamentEvent::TournamentComplete { .. } => {
                None
            }
        }
    }
}
