//! Colour difference endpoint

use axum::{extract::Query, http::StatusCode, Json};
use huecue_core::{accuracy_percent, color_difference, interpret_delta_e, parse_hex_color};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Deserialize)]
pub struct DeltaEParams {
    pub a: String,
    pub b: String,
}

#[derive(Serialize)]
pub struct DeltaEResponse {
    pub delta_e: f64,
    pub verdict: &'static str,
    pub accuracy: f64,
}

/// CIEDE2000 difference between two hex colours
pub async fn get_delta_e(
    Query(params): Query<DeltaEParams>,
) -> Result<Json<DeltaEResponse>, (StatusCode, Json<Value>)> {
    let bad_request = |err: huecue_core::BoardError| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
    };

    let a = parse_hex_color(&params.a).map_err(bad_request)?;
    let b = parse_hex_color(&params.b).map_err(bad_request)?;
    let delta_e = color_difference(a, b);

    Ok(Json(DeltaEResponse {
        delta_e,
        verdict: interpret_delta_e(delta_e),
        accuracy: accuracy_percent(delta_e),
    }))
}
