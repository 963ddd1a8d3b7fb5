use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Typed failure modes of the Spotify Web API.
///
/// Classification happens once, in [`check`]; callers match on variants to
/// decide between re-authentication, user-facing messages and plain
/// failures.
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("spotify rejected the access token")]
    Unauthorized,

    #[error("Spotify Premium is required for playback control")]
    PremiumRequired,

    #[error("no active Spotify device found")]
    NoActiveDevice,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: u64 },

    #[error("spotify returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("spotify request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Error payload carried by non-2xx Web API responses.
///
/// The player endpoints additionally set `reason` (e.g. `NO_ACTIVE_DEVICE`,
/// `PREMIUM_REQUIRED`); older endpoints only carry `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorDetail {
    pub status: Option<u16>,
    pub message: Option<String>,
    pub reason: Option<String>,
}

/// Passes 2xx responses through and classifies everything else.
///
/// Reads the `Retry-After` header before consuming the body, then feeds the
/// parsed error payload to [`classify`].
pub async fn check(response: Response) -> Result<Response, SpotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let body = response.json::<ErrorEnvelope>().await.unwrap_or_default();

    Err(classify(status, retry_after, &body))
}

/// Maps an upstream status and error payload to a [`SpotifyError`].
///
/// The structured `reason` field is authoritative when present; the message
/// substring match is the contained fallback for endpoints that predate it.
pub fn classify(status: StatusCode, retry_after: Option<u64>, body: &ErrorEnvelope) -> SpotifyError {
    let message = body
        .error
        .message
        .clone()
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
    let reason = body.error.reason.as_deref().unwrap_or("");

    match status {
        StatusCode::UNAUTHORIZED => SpotifyError::Unauthorized,
        StatusCode::FORBIDDEN => {
            if reason == "PREMIUM_REQUIRED" || message.to_lowercase().contains("premium") {
                SpotifyError::PremiumRequired
            } else {
                SpotifyError::Forbidden(message)
            }
        }
        StatusCode::NOT_FOUND => {
            if reason == "NO_ACTIVE_DEVICE"
                || message.to_lowercase().contains("no active device")
                || message.to_lowercase().contains("device not found")
            {
                SpotifyError::NoActiveDevice
            } else {
                SpotifyError::NotFound(message)
            }
        }
        StatusCode::BAD_REQUEST => SpotifyError::BadRequest(message),
        StatusCode::TOO_MANY_REQUESTS => SpotifyError::RateLimited {
            retry_after: retry_after.unwrap_or(1),
        },
        _ => SpotifyError::Upstream {
            status: status.as_u16(),
            message,
        },
    }
}
