//! Configuration management for the Tempodeck server.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API credentials, the
//! session-cookie secret, server settings and upstream endpoints.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file passed on the command line, or the one in the local data
//!    directory (`tempodeck/.env`)
//! 3. Application defaults (upstream endpoint URLs only)

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file.
///
/// With no explicit path, looks for the file in the platform-specific local
/// data directory under `tempodeck/.env`, creating the directory structure
/// if it doesn't exist. A missing file is not an error: the process
/// environment may already carry everything, and a `.env` in the working
/// directory is picked up as a fallback.
///
/// # Directory Structure
///
/// The default lookup location is:
/// - Linux: `~/.local/share/tempodeck/.env`
/// - macOS: `~/Library/Application Support/tempodeck/.env`
/// - Windows: `%LOCALAPPDATA%/tempodeck/.env`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or an existing
/// file cannot be parsed.
pub async fn load_env(custom_path: Option<PathBuf>) -> Result<(), String> {
    let path = match custom_path {
        Some(path) => path,
        None => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("tempodeck/.env");
            if let Some(parent) = path.parent() {
                async_fs::create_dir_all(parent)
                    .await
                    .map_err(|e| e.to_string())?;
            }
            path
        }
    };

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    } else {
        // fall back to a .env in the working directory, if any
        dotenv::dotenv().ok();
    }

    Ok(())
}

/// Returns the address the HTTP server binds to.
///
/// Retrieves the `SERVER_ADDRESS` environment variable, defaulting to
/// `127.0.0.1:3001` when unset.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:3001"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3001".to_string())
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_CLIENT_ID` environment variable which contains
/// the client ID obtained when registering the application with Spotify's
/// developer platform.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// Retrieves the `SPOTIFY_CLIENT_SECRET` environment variable. The secret is
/// used for HTTP Basic authentication against the token endpoint and should
/// never appear in logs or version control.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_SECRET` environment variable is not set.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").expect("SPOTIFY_CLIENT_SECRET must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Retrieves the `SPOTIFY_REDIRECT_URI` environment variable which specifies
/// the callback URL Spotify redirects to after user authorization. This must
/// match the redirect URI registered in the Spotify application settings.
///
/// # Panics
///
/// Panics if the `SPOTIFY_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI").expect("SPOTIFY_REDIRECT_URI must be set")
}

/// Returns the secret key for the session cookie integrity tag.
///
/// Retrieves the `SESSION_SECRET` environment variable. Rotating the secret
/// invalidates every outstanding session cookie, which degrades to the
/// normal "decode failure means anonymous" path.
///
/// # Panics
///
/// Panics if the `SESSION_SECRET` environment variable is not set.
pub fn session_secret() -> String {
    env::var("SESSION_SECRET").expect("SESSION_SECRET must be set")
}

/// Returns whether session cookies are marked `Secure`.
///
/// Driven by the `COOKIE_SECURE` environment variable (`true`/`1`); defaults
/// to `false` so local development over plain HTTP keeps working.
pub fn cookie_secure() -> bool {
    env::var("COOKIE_SECURE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

/// Returns the browser UI origin allowed by the CORS layer, if any.
///
/// Retrieves the `UI_ORIGIN` environment variable. When unset, no CORS layer
/// is installed and the UI is expected to be served from the same origin.
pub fn ui_origin() -> Option<String> {
    env::var("UI_ORIGIN").ok().filter(|v| !v.is_empty())
}

/// Returns the Spotify OAuth authorization URL.
///
/// Retrieves the `SPOTIFY_AUTH_URL` environment variable, defaulting to the
/// production endpoint.
pub fn spotify_auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Retrieves the `SPOTIFY_TOKEN_URL` environment variable, defaulting to the
/// production endpoint. Used for both the authorization-code and the
/// refresh-token grant.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable, defaulting to the
/// production endpoint. This is used for all API operations after
/// authentication.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the audio-analysis provider base URL.
///
/// Retrieves the `AUDIO_API_URL` environment variable, defaulting to the
/// production endpoint. The provider's batch endpoint is unauthenticated.
pub fn audio_api_url() -> String {
    env::var("AUDIO_API_URL").unwrap_or_else(|_| "https://api.reccobeats.com/v1".to_string())
}
