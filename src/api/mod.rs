//! # API Module
//!
//! This module provides the HTTP route handlers for the Tempodeck server:
//! the OAuth login/callback/logout/session flow, catalog search, playlist
//! management, audio-feature lookups, playback control and a health check.
//!
//! ## Structure
//!
//! Handlers are grouped one file per route family:
//!
//! - [`auth`] - login redirect, OAuth callback, logout, session report, and
//!   the [`auth::Authed`] extractor that decodes and lazily refreshes the
//!   session cookie for every protected route
//! - [`search`] - track search against the Spotify catalog
//! - [`playlists`] - listing, creation, detail, updates and the track
//!   mutations (add/remove/reorder/move)
//! - [`features`] - single and batch audio-feature lookups (cache-backed)
//! - [`player`] - playback state, devices, play/pause/transfer
//! - [`error`] - the JSON error envelope with stable machine-readable codes
//!
//! ## Conventions
//!
//! Handlers catch every failure and answer a JSON body of the shape
//! `{"error": "...", "code": "..."}`; nothing here can take the process
//! down. Session state travels exclusively in the `spotify_session`
//! cookie, so handlers that may refresh the token return the cookie jar
//! with their response to get the updated cookie back to the browser.

pub mod auth;
pub mod error;
pub mod features;
mod health;
pub mod player;
pub mod playlists;
pub mod search;

pub use health::health;
