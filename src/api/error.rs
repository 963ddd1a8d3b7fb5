use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    analysis::AnalysisError,
    management::{MoveError, MovePhase},
    spotify::error::SpotifyError,
};

/// JSON error envelope returned by every route.
///
/// `code` is a stable machine-readable value the UI branches on; `message`
/// is for humans and may pass an upstream message through where safe.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            code: "BAD_REQUEST",
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        ApiError {
            status: StatusCode::UNAUTHORIZED,
            code: "NOT_AUTHENTICATED",
            message: "Not authenticated".to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            code: "NOT_FOUND",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, "{}", self.message);
        }
        (
            self.status,
            Json(json!({ "error": self.message, "code": self.code })),
        )
            .into_response()
    }
}

impl From<SpotifyError> for ApiError {
    fn from(err: SpotifyError) -> Self {
        match err {
            SpotifyError::Unauthorized => ApiError {
                status: StatusCode::UNAUTHORIZED,
                code: "NOT_AUTHENTICATED",
                message: "Spotify rejected the access token".to_string(),
            },
            SpotifyError::PremiumRequired => ApiError {
                status: StatusCode::FORBIDDEN,
                code: "PREMIUM_REQUIRED",
                message: "Spotify Premium is required for playback control".to_string(),
            },
            SpotifyError::NoActiveDevice => ApiError {
                status: StatusCode::NOT_FOUND,
                code: "NO_ACTIVE_DEVICE",
                message: "No active Spotify device found. Please open Spotify on your device first."
                    .to_string(),
            },
            SpotifyError::Forbidden(message) => ApiError {
                status: StatusCode::FORBIDDEN,
                code: "FORBIDDEN",
                message,
            },
            SpotifyError::NotFound(message) => ApiError {
                status: StatusCode::NOT_FOUND,
                code: "NOT_FOUND",
                message,
            },
            SpotifyError::BadRequest(message) => ApiError {
                status: StatusCode::BAD_REQUEST,
                code: "BAD_REQUEST",
                message,
            },
            SpotifyError::RateLimited { retry_after } => ApiError {
                status: StatusCode::TOO_MANY_REQUESTS,
                code: "RATE_LIMITED",
                message: format!("Rate limited by Spotify, retry after {retry_after}s"),
            },
            SpotifyError::Upstream { status, message } => ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "UPSTREAM_ERROR",
                message: format!("Spotify error {status}: {message}"),
            },
            SpotifyError::Network(err) => ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "UPSTREAM_ERROR",
                message: format!("Spotify request failed: {err}"),
            },
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "UPSTREAM_ERROR",
            message: format!("Failed to get audio features: {err}"),
        }
    }
}

impl From<MoveError> for ApiError {
    fn from(err: MoveError) -> Self {
        match err.phase {
            // nothing happened yet, surface the underlying failure
            MovePhase::Add => {
                let inner = ApiError::from(err.cause);
                ApiError {
                    status: inner.status,
                    code: inner.code,
                    message: format!("Move failed while adding to the target: {}", inner.message),
                }
            }
            // the add went through, so this is a partial completion
            MovePhase::Remove => ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "PARTIAL_FAILURE",
                message: err.to_string(),
            },
        }
    }
}
