use crate::{spotify::error::SpotifyError, types::Session, types::TokenResponse};

/// Refresh this long before the access token actually expires.
pub const REFRESH_MARGIN_MS: i64 = 60_000;

/// The one upstream call the refresh manager needs, behind a trait so the
/// refresh decision logic is testable without a network.
#[allow(async_fn_in_trait)]
pub trait TokenRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, SpotifyError>;
}

/// Result of [`ensure_fresh`]: the (possibly replaced) session plus whether
/// a refresh actually happened, so callers only re-set the cookie when the
/// contents changed.
pub struct FreshSession {
    pub session: Session,
    pub refreshed: bool,
}

pub fn needs_refresh(session: &Session, now_ms: i64) -> bool {
    now_ms > session.expires_at - REFRESH_MARGIN_MS
}

/// Ensures the session's access token is usable, refreshing it lazily.
///
/// Inside the safety margin this performs no I/O and returns the input
/// unchanged. Past it, the refresh grant runs exactly once; the refresh
/// token is only replaced when the upstream response carries a new one.
///
/// A refresh failure propagates to the caller, which must delete the
/// session cookie and answer 401 - never retry with the same stale refresh
/// token.
///
/// Concurrent requests from one browser may each see a near-expired token
/// and each refresh; that race is accepted (refresh is idempotent from the
/// user's perspective and the last cookie write wins).
pub async fn ensure_fresh<R: TokenRefresher>(
    mut session: Session,
    now_ms: i64,
    refresher: &R,
) -> Result<FreshSession, SpotifyError> {
    if !needs_refresh(&session, now_ms) {
        return Ok(FreshSession {
            session,
            refreshed: false,
        });
    }

    let token = refresher.refresh(&session.refresh_token).await?;
    session.access_token = token.access_token;
    session.expires_at = now_ms + token.expires_in * 1000;
    if let Some(refresh_token) = token.refresh_token {
        session.refresh_token = refresh_token;
    }

    Ok(FreshSession {
        session,
        refreshed: true,
    })
}
