//! Server state management
//!
//! Everything a game request needs to start a tournament: the completion
//! backend, the roster, and the pacing between phases.

use std::sync::Arc;

use huecue_tournament::{CompletionProvider, PacingConfig, Roster};

/// Shared, read-only state behind every handler
pub struct ServerState {
    provider: Arc<dyn CompletionProvider>,
    roster: Roster,
    pacing: PacingConfig,
}

impl ServerState {
    pub fn new(provider: Arc<dyn CompletionProvider>, roster: Roster) -> Self {
        Self {
            provider,
            roster,
            pacing: PacingConfig::default(),
        }
    }

    /// Override the delays between observable phases
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn provider(&self) -> &dyn CompletionProvider {
        self.provider.as_ref()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn pacing(&self) -> PacingConfig {
        self.pacing
    }
}
