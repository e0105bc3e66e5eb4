//! Grid scoring - reward zones by Chebyshev distance from the target
//!
//! - exact (distance 0): 3 points
//! - inner ring (3x3 square): 2 points
//! - outer ring (5x5 boundary): 1 point
//! - anything further, or an unusable guess: 0 points

use serde::{Deserialize, Serialize};

use crate::board::{parse_coordinate, Coordinate};

/// Reward zone of a guess
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Exact,
    Inner,
    Outer,
    Miss,
}

impl Zone {
    /// Points awarded to a guesser landing in this zone
    pub fn points(&self) -> u32 {
        match self {
            Zone::Exact => 3,
            Zone::Inner => 2,
            Zone::Outer => 1,
            Zone::Miss => 0,
        }
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Exact => "Perfect!",
            Zone::Inner => "Excellent!",
            Zone::Outer => "Close!",
            Zone::Miss => "Miss",
        }
    }

    /// Zone for a Chebyshev distance
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0 => Zone::Exact,
            1 => Zone::Inner,
            2 => Zone::Outer,
            _ => Zone::Miss,
        }
    }
}

/// Absolute row and column offsets between two cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GridDistance {
    pub row_diff: u32,
    pub col_diff: u32,
}

impl GridDistance {
    /// Offsets between two parsed cells
    pub fn between(a: Coordinate, b: Coordinate) -> Self {
        Self {
            row_diff: u32::from(a.row().abs_diff(b.row())),
            col_diff: u32::from(a.column().abs_diff(b.column())),
        }
    }

    /// Chebyshev distance: the larger of the two offsets
    pub fn chebyshev(&self) -> u32 {
        self.row_diff.max(self.col_diff)
    }
}

/// Score of one guess against a target
///
/// `distance` is `None` when either side was not a valid coordinate
/// (an infinite distance).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub zone: Zone,
    pub distance: Option<u32>,
}

impl ScoreResult {
    /// Result for a guess that could not be placed on the board
    pub const MISS: ScoreResult = ScoreResult {
        score: 0,
        zone: Zone::Miss,
        distance: None,
    };

    /// Whether this guess earns the clue-giver a bonus point
    pub fn counts_for_clue_giver(&self) -> bool {
        self.score >= 2
    }
}

/// Offsets between two coordinate tokens, `None` if either fails to parse
pub fn grid_distance(a: &str, b: &str) -> Option<GridDistance> {
    let a = parse_coordinate(a)?;
    let b = parse_coordinate(b)?;
    Some(GridDistance::between(a, b))
}

/// Classify a guess token against a target token
pub fn classify(guess: &str, target: &str) -> ScoreResult {
    match grid_distance(guess, target) {
        Some(distance) => score_distance(distance.chebyshev()),
        None => ScoreResult::MISS,
    }
}

/// Classify an already parsed guess
pub fn score_guess(guess: Coordinate, target: Coordinate) -> ScoreResult {
    score_distance(GridDistance::between(guess, target).chebyshev())
}

fn score_distance(distance: u32) -> ScoreResult {
    let zone = Zone::from_distance(distance);
    ScoreResult {
        score: zone.points(),
        zone,
        distance: Some(distance),
    }
}

/// Cells in each scoring zone around a target
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScoringZones {
    pub exact: Vec<Coordinate>,
    pub inner: Vec<Coordinate>,
    pub outer: Vec<Coordinate>,
}

impl ScoringZones {
    /// Total number of cells across all zones
    pub fn len(&self) -> usize {
        self.exact.len() + self.inner.len() + self.outer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zone containing a cell, if any
    pub fn zone_of(&self, coordinate: Coordinate) -> Option<Zone> {
        if self.exact.contains(&coordinate) {
            Some(Zone::Exact)
        } else if self.inner.contains(&coordinate) {
            Some(Zone::Inner)
        } else if self.outer.contains(&coordinate) {
            Some(Zone::Outer)
        } else {
            None
        }
    }
}

/// Enumerate the 5x5 neighbourhood of a target, clipped to the board
pub fn zone_members(target: Coordinate) -> ScoringZones {
    let mut zones = ScoringZones::default();
    let row = i32::from(target.row());
    let col = i32::from(target.column_index());

    for row_offset in -2i32..=2 {
        for col_offset in -2i32..=2 {
            let Some(cell) = Coordinate::from_indices(row + row_offset, col + col_offset) else {
                continue;
            };

            match row_offset.unsigned_abs().max(col_offset.unsigned_abs()) {
                0 => zones.exact.push(cell),
                1 => zones.inner.push(cell),
                _ => zones.outer.push(cell),
            }
        }
    }

    zones
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::all_coordinates;
    use std::collections::HashSet;

    fn coord(token: &str) -> Coordinate {
        parse_coordinate(token).unwrap()
    }

    #[test]
    fn test_classify_self_is_exact() {
        for c in all_coordinates() {
            let token = c.to_string();
            assert_eq!(
                classify(&token, &token),
                ScoreResult {
                    score: 3,
                    zone: Zone::Exact,
                    distance: Some(0)
                }
            );
        }
    }

    #[test]
    fn test_classify_rings() {
        assert_eq!(classify("K13", "K12").zone, Zone::Inner);
        assert_eq!(classify("L11", "K12").score, 2);
        assert_eq!(classify("M14", "K12").zone, Zone::Outer);
        assert_eq!(classify("M14", "K12").score, 1);
        assert_eq!(classify("I12", "K12").distance, Some(2));

        let far = classify("N12", "K12");
        assert_eq!(far.zone, Zone::Miss);
        assert_eq!(far.score, 0);
        assert_eq!(far.distance, Some(3));
    }

    #[test]
    fn test_classify_invalid_is_miss() {
        assert_eq!(classify("Z99", "K12"), ScoreResult::MISS);
        assert_eq!(classify("K12", ""), ScoreResult::MISS);
        assert!(grid_distance("K12", "K25").is_none());
    }

    #[test]
    fn test_classify_matches_chebyshev_everywhere() {
        let target = coord("K12");
        for guess in all_coordinates() {
            let d = GridDistance::between(guess, target).chebyshev();
            let result = score_guess(guess, target);
            let expected = match d {
                0 => 3,
                1 => 2,
                2 => 1,
                _ => 0,
            };
            assert_eq!(result.score, expected);
            assert_eq!(result.distance, Some(d));
        }
    }

    #[test]
    fn test_zone_members_center() {
        let zones = zone_members(coord("K12"));
        assert_eq!(zones.exact, vec![coord("K12")]);
        assert_eq!(zones.inner.len(), 8);
        assert_eq!(zones.outer.len(), 16);
        assert_eq!(zones.len(), 25);
        assert_eq!(zones.zone_of(coord("M14")), Some(Zone::Outer));
        assert_eq!(zones.zone_of(coord("N12")), None);
    }

    #[test]
    fn test_zone_members_corner() {
        let zones = zone_members(coord("A1"));
        assert_eq!(zones.exact.len(), 1);
        assert_eq!(zones.inner.len(), 3);
        assert_eq!(zones.outer.len(), 5);
    }

    #[test]
    fn test_zone_members_disjoint_and_bounded() {
        for target in all_coordinates() {
            let zones = zone_members(target);
            let all: HashSet<_> = zones
                .exact
                .iter()
                .chain(&zones.inner)
                .chain(&zones.outer)
                .collect();
            assert_eq!(all.len(), zones.len());
            assert!(zones.len() <= 25);
            for &cell in &zones.inner {
                assert_eq!(score_guess(cell, target).zone, Zone::Inner);
            }
            for &cell in &zones.outer {
                assert_eq!(score_guess(cell, target).zone, Zone::Outer);
            }
        }
    }

    #[test]
    fn test_zone_labels() {
        assert_eq!(Zone::Exact.label(), "Perfect!");
        assert_eq!(Zone::Miss.points(), 0);
        assert_eq!(serde_json::to_string(&Zone::Inner).unwrap(), "\"inner\"");
    }
}
