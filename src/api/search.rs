use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::{auth::Authed, error::ApiError},
    server::AppState,
    types::Track,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
}

pub async fn search(
    State(state): State<AppState>,
    authed: Authed,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let query = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Query required"))?;
    let limit = params.limit.unwrap_or(20).clamp(1, 50);
    let offset = params.offset.unwrap_or(0);

    let result = state
        .spotify
        .search_tracks(&authed.session.access_token, &query, limit, offset)
        .await?;

    let total = result.tracks.total;
    let tracks: Vec<Track> = result
        .tracks
        .items
        .into_iter()
        .filter_map(Track::from_wire)
        .collect();

    Ok((authed.jar, Json(json!({ "tracks": tracks, "total": total }))).into_response())
}
