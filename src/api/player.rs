use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    api::{auth::Authed, error::ApiError},
    server::AppState,
    types::{PauseBody, PlayBody, TransferBody},
};

pub async fn state(State(state): State<AppState>, authed: Authed) -> Result<Response, ApiError> {
    let playback = state
        .spotify
        .playback_state(&authed.session.access_token)
        .await?;

    // nothing playing anywhere answers null, mirroring the upstream 204
    Ok((authed.jar, Json(json!(playback))).into_response())
}

pub async fn devices(State(state): State<AppState>, authed: Authed) -> Result<Response, ApiError> {
    let devices = state
        .spotify
        .devices(&authed.session.access_token)
        .await?;

    Ok((authed.jar, Json(json!(devices))).into_response())
}

pub async fn play(
    State(state): State<AppState>,
    authed: Authed,
    Json(body): Json<PlayBody>,
) -> Result<Response, ApiError> {
    if body.uri.is_empty() {
        return Err(ApiError::bad_request("Missing required parameters: type and uri"));
    }

    let token = &authed.session.access_token;
    let device_id = body.device_id.as_deref();

    match body.play_type.as_str() {
        "track" => state.spotify.play_track(token, &body.uri, device_id).await?,
        "playlist" => {
            state
                .spotify
                .play_context(token, &body.uri, device_id)
                .await?
        }
        _ => {
            return Err(ApiError::bad_request(
                "Invalid type. Must be 'track' or 'playlist'",
            ));
        }
    }

    Ok((authed.jar, Json(json!({ "success": true }))).into_response())
}

pub async fn pause(
    State(state): State<AppState>,
    authed: Authed,
    Json(body): Json<PauseBody>,
) -> Result<Response, ApiError> {
    state
        .spotify
        .pause(&authed.session.access_token, body.device_id.as_deref())
        .await?;

    Ok((authed.jar, Json(json!({ "success": true }))).into_response())
}

pub async fn transfer(
    State(state): State<AppState>,
    authed: Authed,
    Json(body): Json<TransferBody>,
) -> Result<Response, ApiError> {
    if body.device_id.is_empty() {
        return Err(ApiError::bad_request("Device id required"));
    }

    state
        .spotify
        .transfer_playback(&authed.session.access_token, &body.device_id, body.play)
        .await?;

    Ok((authed.jar, Json(json!({ "success": true }))).into_response())
}
