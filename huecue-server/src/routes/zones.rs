//! Scoring zone endpoint

use axum::{extract::Path, http::StatusCode, Json};
use huecue_core::{parse_coordinate, zone_members, Coordinate, ScoringZones};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
pub struct ZonesResponse {
    pub target: Coordinate,
    #[serde(flatten)]
    pub zones: ScoringZones,
}

/// Cells in each scoring zone around a target
pub async fn get_zones(
    Path(coordinate): Path<String>,
) -> Result<Json<ZonesResponse>, (StatusCode, Json<Value>)> {
    let target = parse_coordinate(&coordinate).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("invalid coordinate: {coordinate}") })),
        )
    })?;

    Ok(Json(ZonesResponse {
        target,
        zones: zone_members(target),
    }))
}
