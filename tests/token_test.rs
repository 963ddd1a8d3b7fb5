use std::sync::atomic::{AtomicUsize, Ordering};

use tempodeck::management::token::{REFRESH_MARGIN_MS, TokenRefresher, ensure_fresh, needs_refresh};
use tempodeck::spotify::error::SpotifyError;
use tempodeck::types::{Session, SessionUser, TokenResponse};

const NOW: i64 = 1_700_000_000_000;

// Helper function to create a session expiring at the given time
fn create_test_session(expires_at: i64) -> Session {
    Session {
        access_token: "stale-access".to_string(),
        refresh_token: "refresh-1".to_string(),
        expires_at,
        user: SessionUser {
            id: "wizzler".to_string(),
            name: "Wizzler".to_string(),
            email: None,
            image: None,
        },
    }
}

struct CountingRefresher {
    calls: AtomicUsize,
    rotate: bool,
    fail: bool,
}

impl CountingRefresher {
    fn new() -> Self {
        CountingRefresher {
            calls: AtomicUsize::new(0),
            rotate: false,
            fail: false,
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenRefresher for CountingRefresher {
    async fn refresh(&self, _refresh_token: &str) -> Result<TokenResponse, SpotifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SpotifyError::Unauthorized);
        }
        Ok(TokenResponse {
            access_token: "fresh-access".to_string(),
            refresh_token: self.rotate.then(|| "refresh-2".to_string()),
            expires_in: 3600,
            scope: None,
            token_type: None,
        })
    }
}

#[test]
fn test_needs_refresh_boundaries() {
    // Exactly at the margin boundary: still fresh
    let session = create_test_session(NOW + REFRESH_MARGIN_MS);
    assert!(!needs_refresh(&session, NOW));

    // One millisecond past the boundary: refresh
    let session = create_test_session(NOW + REFRESH_MARGIN_MS - 1);
    assert!(needs_refresh(&session, NOW));

    // Long expired: refresh
    let session = create_test_session(NOW - 1);
    assert!(needs_refresh(&session, NOW));
}

#[tokio::test]
async fn test_fresh_session_performs_no_network_call() {
    let refresher = CountingRefresher::new();
    let session = create_test_session(NOW + 3_600_000);

    let fresh = ensure_fresh(session.clone(), NOW, &refresher).await.unwrap();

    // No refresh happened and the session is byte-for-byte the input
    assert_eq!(refresher.call_count(), 0);
    assert!(!fresh.refreshed);
    assert_eq!(fresh.session.access_token, session.access_token);
    assert_eq!(fresh.session.refresh_token, session.refresh_token);
    assert_eq!(fresh.session.expires_at, session.expires_at);
}

#[tokio::test]
async fn test_stale_session_refreshes_exactly_once() {
    let refresher = CountingRefresher::new();
    let old_expires_at = NOW - 1000;
    let session = create_test_session(old_expires_at);

    let fresh = ensure_fresh(session, NOW, &refresher).await.unwrap();

    // Exactly one upstream call
    assert_eq!(refresher.call_count(), 1);
    assert!(fresh.refreshed);

    // New access token, strictly greater expiry
    assert_eq!(fresh.session.access_token, "fresh-access");
    assert_eq!(fresh.session.expires_at, NOW + 3_600_000);
    assert!(fresh.session.expires_at > old_expires_at);

    // Upstream sent no new refresh token, so the old one is kept
    assert_eq!(fresh.session.refresh_token, "refresh-1");
}

#[tokio::test]
async fn test_rotated_refresh_token_is_adopted() {
    let refresher = CountingRefresher {
        rotate: true,
        ..CountingRefresher::new()
    };
    let session = create_test_session(NOW - 1000);

    let fresh = ensure_fresh(session, NOW, &refresher).await.unwrap();

    assert_eq!(fresh.session.refresh_token, "refresh-2");
}

#[tokio::test]
async fn test_refresh_failure_propagates() {
    let refresher = CountingRefresher {
        fail: true,
        ..CountingRefresher::new()
    };
    let session = create_test_session(NOW - 1000);

    let result = ensure_fresh(session, NOW, &refresher).await;

    // The caller is responsible for deleting the session and forcing a new
    // login; there is no silent retry with the stale refresh token
    assert!(matches!(result, Err(SpotifyError::Unauthorized)));
    assert_eq!(refresher.call_count(), 1);
}

#[tokio::test]
async fn test_concurrent_lazy_refresh_race_is_accepted() {
    // Two requests observing the same near-expired cookie each refresh;
    // this is the documented behavior, not a bug: refresh is idempotent
    // from the user's perspective and the last cookie write wins.
    let refresher = CountingRefresher::new();
    let session = create_test_session(NOW - 1000);

    let first = ensure_fresh(session.clone(), NOW, &refresher).await.unwrap();
    let second = ensure_fresh(session, NOW, &refresher).await.unwrap();

    assert_eq!(refresher.call_count(), 2);
    assert!(first.refreshed && second.refreshed);
    assert_eq!(first.session.access_token, second.session.access_token);
}
