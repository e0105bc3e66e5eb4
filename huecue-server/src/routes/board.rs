//! Board geometry endpoint

use axum::Json;
use huecue_core::{color_map, Cell, COLUMN_COUNT, ROWS};
use serde::Serialize;

#[derive(Serialize)]
pub struct BoardInfo {
    pub rows: Vec<char>,
    pub columns: u8,
    pub cells: Vec<Cell>,
}

/// Get board geometry with every cell's colour
pub async fn get_board() -> Json<BoardInfo> {
    Json(BoardInfo {
        rows: ROWS.to_vec(),
        columns: COLUMN_COUNT,
        cells: color_map(),
    })
}
