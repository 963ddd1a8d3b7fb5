use reqwest::StatusCode;
use serde::Deserialize;

use crate::{
    management::token::TokenRefresher,
    spotify::{SpotifyClient, error::SpotifyError},
    types::TokenResponse,
};

/// Scopes requested during authorization. The UI needs profile data plus
/// read/write access to the user's playlists and playback control.
pub const SCOPES: &str = "user-read-private user-read-email user-read-playback-state \
user-modify-playback-state playlist-read-private playlist-read-collaborative \
playlist-modify-public playlist-modify-private";

/// Error payload of the accounts-service token endpoint, which uses the
/// OAuth error shape rather than the Web API's nested envelope.
#[derive(Debug, Default, Deserialize)]
struct OAuthErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

impl SpotifyClient {
    /// Builds the authorization URL the browser is redirected to at login.
    ///
    /// The `state` nonce ties the eventual callback to a login this server
    /// initiated; the callback handler compares it byte-for-byte against
    /// the value stored in the short-lived state cookie.
    ///
    /// # Arguments
    ///
    /// * `state` - Random nonce stored in the `spotify_auth_state` cookie
    ///
    /// # Example
    ///
    /// ```
    /// let url = client.authorize_url("Xq3...nonce");
    /// // https://accounts.spotify.com/authorize?client_id=...&state=Xq3...
    /// ```
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
            auth_url = self.config.auth_url,
            client_id = urlencoding::encode(&self.config.client_id),
            redirect_uri = urlencoding::encode(&self.config.redirect_uri),
            scope = urlencoding::encode(SCOPES),
            state = urlencoding::encode(state),
        )
    }

    /// Exchanges an authorization code for an access/refresh token pair.
    ///
    /// Completes the authorization-code grant using HTTP Basic client
    /// authentication (this is a confidential client; the secret never
    /// leaves the server).
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code received on the OAuth callback
    ///
    /// # Errors
    ///
    /// Invalid or expired codes come back as
    /// [`SpotifyError::Unauthorized`]; other failures map per
    /// [`crate::spotify::error::classify`]-equivalent rules for the token
    /// endpoint.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, SpotifyError> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &self.config.redirect_uri),
        ])
        .await
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenResponse, SpotifyError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<TokenResponse>().await?);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let body = response.json::<OAuthErrorBody>().await.unwrap_or_default();

        Err(match status {
            StatusCode::TOO_MANY_REQUESTS => SpotifyError::RateLimited {
                retry_after: retry_after.unwrap_or(1),
            },
            // invalid_grant / invalid_client both mean the stored credentials
            // are no longer usable and the user has to log in again
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => SpotifyError::Unauthorized,
            _ => SpotifyError::Upstream {
                status: status.as_u16(),
                message: body
                    .error_description
                    .or(body.error)
                    .unwrap_or_else(|| "token request failed".to_string()),
            },
        })
    }
}

impl TokenRefresher for SpotifyClient {
    /// Exchanges a refresh token for a fresh access token.
    ///
    /// Spotify does not always rotate the refresh token; the response's
    /// `refresh_token` field stays `None` in that case and the caller keeps
    /// the old one.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, SpotifyError> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }
}
