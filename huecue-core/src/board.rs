//! Color board geometry: 20 lettered rows by 24 numbered columns
//!
//! Columns sweep the hue circle, rows step through three saturation and
//! lightness bands (pastel, vivid, deep). Every coordinate maps to exactly
//! one colour and the mapping is pure.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Row letters, top to bottom
pub const ROWS: [char; 20] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T',
];

/// Number of rows on the board
pub const ROW_COUNT: u8 = 20;

/// Number of columns on the board (numbered 1..=24)
pub const COLUMN_COUNT: u8 = 24;

/// Total number of cells
pub const CELL_COUNT: usize = ROW_COUNT as usize * COLUMN_COUNT as usize;

/// Errors produced when reading board values from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid coordinate: {0:?}")]
    InvalidCoordinate(String),

    #[error("invalid hex colour: {0:?}")]
    InvalidColor(String),
}

/// A cell on the board
///
/// `row` is a zero-based index into [`ROWS`]; `column` is the one-based
/// column number as printed on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    row: u8,
    column: u8,
}

impl Coordinate {
    /// Build a coordinate from a zero-based row index and one-based column
    pub fn new(row: u8, column: u8) -> Option<Self> {
        if row < ROW_COUNT && (1..=COLUMN_COUNT).contains(&column) {
            Some(Self { row, column })
        } else {
            None
        }
    }

    /// Build from signed zero-based indices, `None` when off the board
    pub fn from_indices(row: i32, column_index: i32) -> Option<Self> {
        let row = u8::try_from(row).ok()?;
        let column_index = u8::try_from(column_index).ok()?;
        Self::new(row, column_index.checked_add(1)?)
    }

    /// Zero-based row index
    pub fn row(&self) -> u8 {
        self.row
    }

    /// One-based column number
    pub fn column(&self) -> u8 {
        self.column
    }

    /// Zero-based column index
    pub fn column_index(&self) -> u8 {
        self.column - 1
    }

    /// Row letter
    pub fn row_letter(&self) -> char {
        ROWS[self.row as usize]
    }

    /// Colour of this cell
    pub fn color(&self) -> Color {
        color_of(*self)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.column)
    }
}

impl FromStr for Coordinate {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_coordinate(s).ok_or_else(|| BoardError::InvalidCoordinate(s.to_string()))
    }
}

impl TryFrom<String> for Coordinate {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

/// Parse a coordinate token such as `K12` or ` k 12 `
///
/// Case-insensitive and whitespace-insensitive. The remaining text must be
/// exactly one row letter followed by digits naming a column in 1..=24.
pub fn parse_coordinate(token: &str) -> Option<Coordinate> {
    let normalized: String = token
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let mut chars = normalized.chars();
    let letter = chars.next()?;
    let digits = chars.as_str();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let row = ROWS.iter().position(|&r| r == letter)?;
    let column: u32 = digits.parse().ok()?;
    let column = u8::try_from(column).ok()?;

    Coordinate::new(row as u8, column)
}

/// Colour for a coordinate given as text, `None` when the text is invalid
pub fn color_at(token: &str) -> Option<Color> {
    parse_coordinate(token).map(color_of)
}

/// Deterministic colour of a cell
pub fn color_of(coordinate: Coordinate) -> Color {
    let hue = f64::from(coordinate.column_index()) / f64::from(COLUMN_COUNT) * 360.0;
    let (saturation, lightness) = row_band(coordinate.row());
    hsl_to_color(hue, saturation, lightness)
}

/// Saturation and lightness (percent) for a row index
fn row_band(row: u8) -> (f64, f64) {
    let i = f64::from(row);
    match row {
        // Pastel: A-E
        0..=4 => (40.0 + i * 8.0, 85.0 - i * 5.0),
        // Vivid: F-O
        5..=14 => (75.0 + (i - 5.0) * 2.0, 60.0 - (i - 5.0) * 2.0),
        // Deep: P-T
        _ => (80.0 - (i - 15.0) * 5.0, 35.0 - (i - 15.0) * 4.0),
    }
}

/// Standard HSL to RGB conversion, saturation and lightness in percent
fn hsl_to_color(hue: f64, saturation: f64, lightness: f64) -> Color {
    let s = saturation / 100.0;
    let l = lightness / 100.0;
    let a = s * l.min(1.0 - l);

    let channel = |n: f64| -> u8 {
        let k = (n + hue / 30.0) % 12.0;
        let value = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * value).round().clamp(0.0, 255.0) as u8
    };

    Color::new(channel(0.0), channel(8.0), channel(4.0))
}

/// Every coordinate in row-major order
pub fn all_coordinates() -> impl Iterator<Item = Coordinate> {
    (0..ROW_COUNT).flat_map(|row| (1..=COLUMN_COUNT).map(move |column| Coordinate { row, column }))
}

/// A board cell paired with its colour
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub coordinate: Coordinate,
    pub color: Color,
}

/// The full 480-cell colour map in row-major order
pub fn color_map() -> Vec<Cell> {
    all_coordinates()
        .map(|coordinate| Cell {
            coordinate,
            color: color_of(coordinate),
        })
        .collect()
}

/// Uniformly random cell using the thread-local generator
pub fn random_coordinate() -> Coordinate {
    random_coordinate_with(&mut rand::thread_rng())
}

/// Uniformly random cell using the supplied generator
pub fn random_coordinate_with<R: Rng + ?Sized>(rng: &mut R) -> Coordinate {
    Coordinate {
        row: rng.gen_range(0..ROW_COUNT),
        column: rng.gen_range(1..=COLUMN_COUNT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_parse_coordinate() {
        let k12 = parse_coordinate("K12").unwrap();
        assert_eq!(k12.row(), 10);
        assert_eq!(k12.column(), 12);
        assert_eq!(k12.to_string(), "K12");

        assert_eq!(parse_coordinate(" k 12 "), Some(k12));
        assert_eq!(parse_coordinate("a1").unwrap().to_string(), "A1");
        assert_eq!(parse_coordinate("T24").unwrap().to_string(), "T24");
    }

    #[test]
    fn test_parse_coordinate_rejects_invalid() {
        for token in ["", "K", "12", "U1", "K0", "K25", "K1a", "KK1", "K-1", "K99999999999"] {
            assert_eq!(parse_coordinate(token), None, "{token:?} should be invalid");
        }
    }

    #[test]
    fn test_from_str_error() {
        let err = "Z9".parse::<Coordinate>().unwrap_err();
        assert_eq!(err, BoardError::InvalidCoordinate("Z9".to_string()));
    }

    #[test]
    fn test_from_indices_bounds() {
        assert_eq!(Coordinate::from_indices(0, 0).unwrap().to_string(), "A1");
        assert_eq!(Coordinate::from_indices(19, 23).unwrap().to_string(), "T24");
        assert!(Coordinate::from_indices(-1, 0).is_none());
        assert!(Coordinate::from_indices(20, 0).is_none());
        assert!(Coordinate::from_indices(0, 24).is_none());
    }

    #[test]
    fn test_all_coordinates_unique() {
        let all: Vec<_> = all_coordinates().collect();
        assert_eq!(all.len(), CELL_COUNT);
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), CELL_COUNT);
        assert_eq!(all[0].to_string(), "A1");
        assert_eq!(all[CELL_COUNT - 1].to_string(), "T24");
    }

    #[test]
    fn test_known_colors() {
        // Column 1 is hue 0: pure reds in every band
        assert_eq!(color_at("A1").unwrap().to_string(), "#e8c9c9");
        assert_eq!(color_at("F1").unwrap().to_string(), "#e64c4c");
        // Column 7 is hue 90
        assert_eq!(color_at("K7").unwrap().to_string(), "#80ec13");
        assert_eq!(color_at("K12").unwrap().to_string(), "#13ecb6");
        assert_eq!(color_at("T24").unwrap().to_string(), "#4e1322");
    }

    #[test]
    fn test_color_is_deterministic() {
        for coordinate in all_coordinates() {
            assert_eq!(color_of(coordinate), color_of(coordinate));
        }
        assert_eq!(color_at("k12"), color_at("K12"));
        assert_eq!(color_at("nope"), None);
    }

    #[test]
    fn test_serde_as_token() {
        let k12 = parse_coordinate("K12").unwrap();
        let json = serde_json::to_string(&k12).unwrap();
        assert_eq!(json, "\"K12\"");
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, k12);
        assert!(serde_json::from_str::<Coordinate>("\"Z1\"").is_err());
    }

    #[test]
    fn test_random_coordinate_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..2000 {
            let c = random_coordinate_with(&mut rng);
            assert!(c.row() < ROW_COUNT);
            assert!((1..=COLUMN_COUNT).contains(&c.column()));
        }
        let _ = random_coordinate();
    }
}
