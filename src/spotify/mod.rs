//! # Spotify Integration Module
//!
//! This module implements the typed client for the Spotify Web API: token
//! grants, catalog search, playlist CRUD and track mutations, playback
//! control and profile lookup. It is the only layer that talks HTTP to
//! Spotify; everything above it works with the typed results and the error
//! taxonomy defined in [`error`].
//!
//! ## Architecture
//!
//! The module follows a domain-based organization where each submodule
//! covers one area of the Web API:
//!
//! ```text
//! Route handlers / management layer
//!          |
//! Spotify Integration Layer
//!     |- auth      (authorization-code + refresh-token grants)
//!     |- profile   (current user)
//!     |- search    (track search)
//!     |- playlists (CRUD, add/remove/reorder tracks)
//!     |- player    (state, play/pause, devices, transfer)
//!     `- error     (single classification point for upstream failures)
//!          |
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Handling
//!
//! Every non-2xx upstream response passes through [`error::check`] exactly
//! once, which turns the status, `Retry-After` header and error payload into
//! a [`error::SpotifyError`]. Callers branch on the typed variants instead
//! of inspecting response bodies: rate limits (429) and auth failures
//! (401/403) stay distinguishable from generic upstream errors, and the
//! player-specific "no active device" / "premium required" conditions come
//! out as their own variants.
//!
//! A `204 No Content` from a playback-control endpoint is a success with no
//! body and is never fed to the JSON parser.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - code exchange and refresh (Basic client auth)
//! - `GET /me` - user profile
//! - `GET /search` - track search with limit/offset
//! - `GET /me/playlists`, `POST /users/{id}/playlists` - playlist listing and creation
//! - `GET|PUT /playlists/{id}`, `GET|POST|PUT|DELETE /playlists/{id}/tracks`
//! - `GET /me/player`, `GET /me/player/devices`, `PUT /me/player`,
//!   `PUT /me/player/play`, `PUT /me/player/pause`

pub mod auth;
pub mod error;
pub mod player;
pub mod playlists;
pub mod profile;
pub mod search;

use std::time::Duration;

use reqwest::Client;

use crate::config;

/// Endpoint and credential configuration for [`SpotifyClient`].
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl SpotifyConfig {
    pub fn from_env() -> Self {
        SpotifyConfig {
            api_url: config::spotify_api_url(),
            auth_url: config::spotify_auth_url(),
            token_url: config::spotify_token_url(),
            client_id: config::spotify_client_id(),
            client_secret: config::spotify_client_secret(),
            redirect_uri: config::spotify_redirect_uri(),
        }
    }
}

/// Stateless client for the Spotify Web API.
///
/// Holds one pooled HTTP client and the endpoint configuration; every
/// operation takes the bearer token as a parameter, so a single instance
/// serves all sessions.
pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        SpotifyClient { http, config }
    }

    pub fn from_env() -> Self {
        Self::new(SpotifyConfig::from_env())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }
}
