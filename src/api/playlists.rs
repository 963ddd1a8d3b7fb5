use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;

use crate::{
    api::{auth::Authed, error::ApiError},
    management,
    server::AppState,
    types::{
        CreatePlaylistBody, MoveTracksBody, Playlist, ReorderBody, Track, TrackUrisBody,
        UpdatePlaylistBody,
    },
};

/// Playlists with more tracks than this skip inline feature enrichment;
/// the UI falls back to the batch endpoint for them.
const INLINE_FEATURES_MAX: usize = 20;

pub async fn list(State(state): State<AppState>, authed: Authed) -> Result<Response, ApiError> {
    let token = &authed.session.access_token;

    // playback context drives the transient isPlaying flag; a failure here
    // must not take the playlist listing down with it
    let playing_context = match state.spotify.playback_state(token).await {
        Ok(Some(playback)) if playback.is_playing => playback.context.map(|c| c.uri),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!("playback state unavailable: {err}");
            None
        }
    };

    let page = state.spotify.user_playlists(token, 50).await?;
    let playlists: Vec<Playlist> = page
        .items
        .into_iter()
        .map(|p| Playlist::from_summary(p, playing_context.as_deref()))
        .collect();

    Ok((authed.jar, Json(json!({ "playlists": playlists }))).into_response())
}

pub async fn create(
    State(state): State<AppState>,
    authed: Authed,
    Json(body): Json<CreatePlaylistBody>,
) -> Result<Response, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::bad_request("Name required"));
    }

    let token = &authed.session.access_token;
    let profile = state.spotify.user_profile(token).await?;
    let created = state
        .spotify
        .create_playlist(token, &profile.id, body.name.trim(), body.description.as_deref())
        .await?;

    let playlist = Playlist::from_summary(created, None);
    Ok((authed.jar, Json(json!({ "playlist": playlist }))).into_response())
}

pub async fn detail(
    State(state): State<AppState>,
    authed: Authed,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let token = &authed.session.access_token;
    let playlist = state.spotify.playlist(token, &id).await?;
    let (info, mut tracks) = Playlist::from_full(playlist);

    if (1..=INLINE_FEATURES_MAX).contains(&tracks.len()) {
        let now_ms = Utc::now().timestamp_millis();
        state.features.annotate(&mut tracks, now_ms).await;
    }

    Ok((
        authed.jar,
        Json(json!({ "playlist": info, "tracks": tracks })),
    )
        .into_response())
}

pub async fn update(
    State(state): State<AppState>,
    authed: Authed,
    Path(id): Path<String>,
    Json(body): Json<UpdatePlaylistBody>,
) -> Result<Response, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::bad_request("Name required"));
    }

    state
        .spotify
        .update_playlist_details(
            &authed.session.access_token,
            &id,
            body.name.trim(),
            body.description.as_deref(),
        )
        .await?;

    Ok((authed.jar, Json(json!({ "success": true }))).into_response())
}

pub async fn tracks(
    State(state): State<AppState>,
    authed: Authed,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let page = state
        .spotify
        .playlist_tracks(&authed.session.access_token, &id)
        .await?;

    let tracks: Vec<Track> = page
        .items
        .into_iter()
        .filter_map(|item| item.track)
        .filter_map(Track::from_wire)
        .collect();

    Ok((authed.jar, Json(json!({ "tracks": tracks }))).into_response())
}

pub async fn add_tracks(
    State(state): State<AppState>,
    authed: Authed,
    Path(id): Path<String>,
    Json(body): Json<TrackUrisBody>,
) -> Result<Response, ApiError> {
    if body.track_uris.is_empty() {
        return Err(ApiError::bad_request("Track URIs required"));
    }

    let report = management::add_tracks(
        state.spotify.as_ref(),
        &authed.session.access_token,
        &id,
        &body.track_uris,
        body.dedupe,
    )
    .await?;

    Ok((
        authed.jar,
        Json(json!({
            "success": true,
            "added": report.added,
            "skipped": report.skipped,
        })),
    )
        .into_response())
}

pub async fn remove_tracks(
    State(state): State<AppState>,
    authed: Authed,
    Path(id): Path<String>,
    Json(body): Json<TrackUrisBody>,
) -> Result<Response, ApiError> {
    if body.track_uris.is_empty() {
        return Err(ApiError::bad_request("Track URIs required"));
    }

    // by-URI removal: every occurrence of each URI disappears
    state
        .spotify
        .remove_playlist_tracks(&authed.session.access_token, &id, &body.track_uris)
        .await?;

    Ok((authed.jar, Json(json!({ "success": true }))).into_response())
}

pub async fn reorder_tracks(
    State(state): State<AppState>,
    authed: Authed,
    Path(id): Path<String>,
    Json(body): Json<ReorderBody>,
) -> Result<Response, ApiError> {
    management::reorder_track(
        state.spotify.as_ref(),
        &authed.session.access_token,
        &id,
        body.old_index,
        body.new_index,
    )
    .await?;

    Ok((authed.jar, Json(json!({ "success": true }))).into_response())
}

pub async fn move_tracks(
    State(state): State<AppState>,
    authed: Authed,
    Path(id): Path<String>,
    Json(body): Json<MoveTracksBody>,
) -> Result<Response, ApiError> {
    if body.track_uris.is_empty() {
        return Err(ApiError::bad_request("Track URIs required"));
    }
    if body.target_id == id {
        return Err(ApiError::bad_request(
            "Target playlist must differ from the source",
        ));
    }

    management::move_tracks(
        state.spotify.as_ref(),
        &authed.session.access_token,
        &id,
        &body.target_id,
        &body.track_uris,
    )
    .await?;

    Ok((authed.jar, Json(json!({ "success": true }))).into_response())
}
