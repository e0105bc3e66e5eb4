//! HueCue Core - Board, colour science, and scoring
//!
//! This crate provides the pure game logic for the colour-clue tournament:
//! - Board geometry (20x24 lettered grid) and the coordinate -> colour map
//! - sRGB -> L*a*b* conversion and the CIEDE2000 colour difference
//! - Zone scoring by Chebyshev distance
//! - Tolerant parsing of model replies

pub mod board;
pub mod color;
pub mod scoring;
pub mod response;

// Re-exports for convenient access
pub use board::{
    all_coordinates, color_at, color_map, color_of, parse_coordinate, random_coordinate,
    random_coordinate_with, BoardError, Cell, Coordinate, CELL_COUNT, COLUMN_COUNT, ROWS,
    ROW_COUNT,
};
pub use color::{
    accuracy_percent, color_difference, delta_e_2000, hex_to_lab, interpret_delta_e,
    parse_hex_color, Color, Lab,
};
pub use scoring::{
    classify, grid_distance, score_guess, zone_members, GridDistance, ScoreResult, ScoringZones,
    Zone,
};
pub use response::{parse_clue_response, parse_guess_response, ClueResponse, GuessResponse};
