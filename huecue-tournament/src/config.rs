//! Configuration types for tournament runs
//!
//! Level 4 - Utilities and configuration

use std::time::Duration;

use huecue_core::Coordinate;

/// Rounds played when the request does not say
pub const DEFAULT_ROUNDS: usize = 12;

/// Fewest rounds a tournament may request
pub const MIN_ROUNDS: usize = 4;

/// Most rounds a tournament may request
pub const MAX_ROUNDS: usize = 24;

/// Clue used when the clue-giver answered but no word could be extracted
pub const PLACEHOLDER_CLUE: &str = "Mystery";

/// Clamp a requested round count into `MIN_ROUNDS..=MAX_ROUNDS`
pub fn clamp_rounds(requested: i64) -> usize {
    requested.clamp(MIN_ROUNDS as i64, MAX_ROUNDS as i64) as usize
}

/// Round count from an optional request parameter
///
/// Absent, empty, or non-integer values give `DEFAULT_ROUNDS`.
pub fn rounds_from_request(requested: Option<&str>) -> usize {
    requested
        .and_then(|text| text.trim().parse::<i64>().ok())
        .map(clamp_rounds)
        .unwrap_or(DEFAULT_ROUNDS)
}

/// Fixed delays between observable phases of a round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PacingConfig {
    /// Pause after a clue failure before the next round starts
    pub after_clue_failure: Duration,
    /// Pause between revealing the target and scoring
    pub after_reveal: Duration,
    /// Pause after a completed round
    pub after_round: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            after_clue_failure: Duration::from_millis(2000),
            after_reveal: Duration::from_millis(1500),
            after_round: Duration::from_millis(2000),
        }
    }
}

impl PacingConfig {
    /// No delays at all (tests, offline batch runs)
    pub fn none() -> Self {
        Self {
            after_clue_failure: Duration::ZERO,
            after_reveal: Duration::ZERO,
            after_round: Duration::ZERO,
        }
    }
}

/// Where round targets are drawn from
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TargetPool {
    /// Uniform over all 480 cells
    #[default]
    Board,
    /// Uniform over a supplied set; an empty set falls back to the board
    Fixed(Vec<Coordinate>),
}

/// Tournament configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Number of rounds, already clamped
    pub total_rounds: usize,
    /// Delays between phases
    pub pacing: PacingConfig,
    /// Random seed for target selection (None = entropy)
    pub seed: Option<u64>,
    /// Target source
    pub targets: TargetPool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_ROUNDS,
            pacing: PacingConfig::default(),
            seed: None,
            targets: TargetPool::Board,
        }
    }
}

impl TournamentConfig {
    /// Config for a requested round count (clamped)
    pub fn with_rounds(rounds: i64) -> Self {
        Self {
            total_rounds: clamp_rounds(rounds),
            ..Default::default()
        }
    }

    /// Set pacing delays
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draw targets from a fixed set
    pub fn with_targets(mut self, targets: Vec<Coordinate>) -> Self {
        self.targets = TargetPool::Fixed(targets);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_from_request() {
        assert_eq!(rounds_from_request(None), 12);
        assert_eq!(rounds_from_request(Some("")), 12);
        assert_eq!(rounds_from_request(Some("lots")), 12);
        assert_eq!(rounds_from_request(Some("2")), 4);
        assert_eq!(rounds_from_request(Some("-5")), 4);
        assert_eq!(rounds_from_request(Some("99")), 24);
        assert_eq!(rounds_from_request(Some(" 8 ")), 8);
        assert_eq!(rounds_from_request(Some("99999999999999999999")), 12);
    }

    #[test]
    fn test_config_defaults() {
        let config = TournamentConfig::default();
        assert_eq!(config.total_rounds, DEFAULT_ROUNDS);
        assert_eq!(config.pacing.after_reveal, Duration::from_millis(1500));
        assert_eq!(config.targets, TargetPool::Board);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_config_builders() {
        let k12: Coordinate = "K12".parse().unwrap();
        let config = TournamentConfig::with_rounds(30)
            .with_seed(7)
            .with_pacing(PacingConfig::none())
            .with_targets(vec![k12]);
        assert_eq!(config.total_rounds, MAX_ROUNDS);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.pacing.after_round, Duration::ZERO);
        assert_eq!(config.targets, TargetPool::Fixed(vec![k12]));
    }
}
