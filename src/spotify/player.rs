use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::{
    spotify::{SpotifyClient, error},
    types::{DevicesResponse, PlaybackState},
};

impl SpotifyClient {
    /// Retrieves the current playback state.
    ///
    /// Spotify answers `204 No Content` when nothing is playing on any
    /// device; that maps to `Ok(None)` rather than a parse attempt.
    pub async fn playback_state(
        &self,
        token: &str,
    ) -> Result<Option<PlaybackState>, error::SpotifyError> {
        let response = self
            .http
            .get(self.endpoint("/me/player"))
            .bearer_auth(token)
            .send()
            .await?;

        let response = error::check(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(response.json::<PlaybackState>().await?))
    }

    /// Lists the user's available playback devices.
    pub async fn devices(&self, token: &str) -> Result<DevicesResponse, error::SpotifyError> {
        let response = self
            .http
            .get(self.endpoint("/me/player/devices"))
            .bearer_auth(token)
            .send()
            .await?;
        let response = error::check(response).await?;
        Ok(response.json::<DevicesResponse>().await?)
    }

    /// Starts playback of a single track.
    ///
    /// Success is `204 No Content`. Without an active device Spotify
    /// answers 404, which classifies to
    /// [`error::SpotifyError::NoActiveDevice`]; free-tier accounts get
    /// [`error::SpotifyError::PremiumRequired`].
    pub async fn play_track(
        &self,
        token: &str,
        uri: &str,
        device_id: Option<&str>,
    ) -> Result<(), error::SpotifyError> {
        let body = json!({ "uris": [uri] });
        self.play(token, body, device_id).await
    }

    /// Starts playback of a whole context (playlist, album, ...).
    pub async fn play_context(
        &self,
        token: &str,
        context_uri: &str,
        device_id: Option<&str>,
    ) -> Result<(), error::SpotifyError> {
        let body = json!({ "context_uri": context_uri });
        self.play(token, body, device_id).await
    }

    async fn play(
        &self,
        token: &str,
        body: Value,
        device_id: Option<&str>,
    ) -> Result<(), error::SpotifyError> {
        let mut api_url = self.endpoint("/me/player/play");
        if let Some(device_id) = device_id {
            api_url.push_str(&format!("?device_id={}", urlencoding::encode(device_id)));
        }

        let response = self
            .http
            .put(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        // 204 on success, nothing to parse
        error::check(response).await?;
        Ok(())
    }

    /// Pauses playback, optionally on a specific device.
    pub async fn pause(
        &self,
        token: &str,
        device_id: Option<&str>,
    ) -> Result<(), error::SpotifyError> {
        let mut api_url = self.endpoint("/me/player/pause");
        if let Some(device_id) = device_id {
            api_url.push_str(&format!("?device_id={}", urlencoding::encode(device_id)));
        }

        let response = self
            .http
            .put(&api_url)
            .bearer_auth(token)
            // the pause endpoint rejects a missing content-length
            .json(&json!({}))
            .send()
            .await?;
        error::check(response).await?;
        Ok(())
    }

    /// Transfers playback to another device.
    ///
    /// With `play` set, playback resumes on the target device immediately;
    /// otherwise it stays in its current play/pause state.
    pub async fn transfer_playback(
        &self,
        token: &str,
        device_id: &str,
        play: bool,
    ) -> Result<(), error::SpotifyError> {
        let body = json!({
            "device_ids": [device_id],
            "play": play,
        });

        let response = self
            .http
            .put(self.endpoint("/me/player"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        error::check(response).await?;
        Ok(())
    }
}
