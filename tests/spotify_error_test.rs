use reqwest::StatusCode;
use tempodeck::spotify::error::{ErrorDetail, ErrorEnvelope, SpotifyError, classify};

fn envelope(message: Option<&str>, reason: Option<&str>) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorDetail {
            status: None,
            message: message.map(|m| m.to_string()),
            reason: reason.map(|r| r.to_string()),
        },
    }
}

#[test]
fn test_unauthorized() {
    let err = classify(
        StatusCode::UNAUTHORIZED,
        None,
        &envelope(Some("The access token expired"), None),
    );
    assert!(matches!(err, SpotifyError::Unauthorized));
}

#[test]
fn test_premium_required_by_reason() {
    // The structured reason is authoritative when present
    let err = classify(
        StatusCode::FORBIDDEN,
        None,
        &envelope(Some("Player command failed"), Some("PREMIUM_REQUIRED")),
    );
    assert!(matches!(err, SpotifyError::PremiumRequired));
}

#[test]
fn test_premium_required_by_message_fallback() {
    let err = classify(
        StatusCode::FORBIDDEN,
        None,
        &envelope(Some("Premium required"), None),
    );
    assert!(matches!(err, SpotifyError::PremiumRequired));
}

#[test]
fn test_forbidden_without_premium_hint() {
    let err = classify(
        StatusCode::FORBIDDEN,
        None,
        &envelope(Some("Insufficient client scope"), None),
    );
    assert!(matches!(err, SpotifyError::Forbidden(_)));
}

#[test]
fn test_no_active_device_by_reason() {
    let err = classify(
        StatusCode::NOT_FOUND,
        None,
        &envelope(Some("Player command failed"), Some("NO_ACTIVE_DEVICE")),
    );
    assert!(matches!(err, SpotifyError::NoActiveDevice));
}

#[test]
fn test_no_active_device_by_message_fallback() {
    let err = classify(
        StatusCode::NOT_FOUND,
        None,
        &envelope(Some("No active device found"), None),
    );
    assert!(matches!(err, SpotifyError::NoActiveDevice));
}

#[test]
fn test_plain_not_found() {
    let err = classify(
        StatusCode::NOT_FOUND,
        None,
        &envelope(Some("Invalid playlist Id"), None),
    );
    assert!(matches!(err, SpotifyError::NotFound(_)));
}

#[test]
fn test_rate_limited_carries_retry_after() {
    let err = classify(
        StatusCode::TOO_MANY_REQUESTS,
        Some(17),
        &envelope(Some("API rate limit exceeded"), None),
    );
    match err {
        SpotifyError::RateLimited { retry_after } => assert_eq!(retry_after, 17),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[test]
fn test_rate_limited_defaults_retry_after() {
    // A missing Retry-After header still classifies as rate limited
    let err = classify(StatusCode::TOO_MANY_REQUESTS, None, &envelope(None, None));
    match err {
        SpotifyError::RateLimited { retry_after } => assert_eq!(retry_after, 1),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[test]
fn test_server_errors_are_generic_upstream() {
    let err = classify(
        StatusCode::BAD_GATEWAY,
        None,
        &envelope(Some("upstream blew up"), None),
    );
    match err {
        SpotifyError::Upstream { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "upstream blew up");
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}

#[test]
fn test_missing_body_falls_back_to_status_reason() {
    let err = classify(StatusCode::INTERNAL_SERVER_ERROR, None, &envelope(None, None));
    match err {
        SpotifyError::Upstream { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected Upstream, got {other:?}"),
    }
}
