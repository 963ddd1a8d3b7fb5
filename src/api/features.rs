use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::{api::error::ApiError, server::AppState};

// The analysis provider is unauthenticated, so these routes carry no
// session requirement either.

pub async fn single(
    State(state): State<AppState>,
    Path(track_id): Path<String>,
) -> Result<Response, ApiError> {
    let now_ms = Utc::now().timestamp_millis();
    let features = state.features.single(&track_id, now_ms).await?;

    match features {
        Some(f) => Ok(Json(json!({
            "tempo": f.tempo,
            "danceability": f.danceability,
            "energy": f.energy,
        }))
        .into_response()),
        None => Err(ApiError::not_found("Audio features not found")),
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchParams {
    ids: Option<String>,
}

pub async fn batch(
    State(state): State<AppState>,
    Query(params): Query<BatchParams>,
) -> Result<Response, ApiError> {
    let ids: Vec<String> = params
        .ids
        .unwrap_or_default()
        .split(',')
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();

    if ids.is_empty() {
        return Err(ApiError::bad_request("IDs required"));
    }

    let now_ms = Utc::now().timestamp_millis();
    let features = state.features.batch(&ids, now_ms).await?;

    Ok(Json(json!({ "features": features })).into_response())
}
