use serde_json::json;

use crate::{
    spotify::{SpotifyClient, error},
    types::{Paging, PlaylistFull, PlaylistItem, PlaylistSummary, SnapshotResponse},
};

impl SpotifyClient {
    /// Retrieves the authenticated user's playlists.
    ///
    /// Fetches a single page of up to `limit` playlists (Spotify caps the
    /// page size at 50). The UI shows the first page only; pagination is
    /// deliberately not chased here.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token for Spotify API authentication
    /// * `limit` - Maximum number of playlists to return (1-50)
    pub async fn user_playlists(
        &self,
        token: &str,
        limit: u32,
    ) -> Result<Paging<PlaylistSummary>, error::SpotifyError> {
        let api_url = format!("{uri}?limit={limit}", uri = self.endpoint("/me/playlists"));
        let response = self.http.get(&api_url).bearer_auth(token).send().await?;
        let response = error::check(response).await?;
        Ok(response.json::<Paging<PlaylistSummary>>().await?)
    }

    /// Creates a new private playlist for the given user.
    ///
    /// Playlists created through the UI are always private; collaborators
    /// are added through Spotify itself if wanted.
    pub async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<PlaylistSummary, error::SpotifyError> {
        let api_url = self.endpoint(&format!("/users/{user_id}/playlists"));
        let body = json!({
            "name": name,
            "description": description,
            "public": false,
        });

        let response = self
            .http
            .post(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let response = error::check(response).await?;
        Ok(response.json::<PlaylistSummary>().await?)
    }

    /// Retrieves one playlist including its track page.
    pub async fn playlist(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<PlaylistFull, error::SpotifyError> {
        let api_url = self.endpoint(&format!("/playlists/{playlist_id}"));
        let response = self.http.get(&api_url).bearer_auth(token).send().await?;
        let response = error::check(response).await?;
        Ok(response.json::<PlaylistFull>().await?)
    }

    /// Updates a playlist's name and description.
    ///
    /// Spotify answers `200 OK` with an empty body here, so the response is
    /// checked but never parsed.
    pub async fn update_playlist_details(
        &self,
        token: &str,
        playlist_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), error::SpotifyError> {
        let api_url = self.endpoint(&format!("/playlists/{playlist_id}"));
        let mut body = json!({ "name": name });
        if let Some(description) = description {
            body["description"] = json!(description);
        }

        let response = self
            .http
            .put(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        error::check(response).await?;
        Ok(())
    }

    /// Retrieves a playlist's tracks.
    pub async fn playlist_tracks(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<Paging<PlaylistItem>, error::SpotifyError> {
        let api_url = self.endpoint(&format!("/playlists/{playlist_id}/tracks"));
        let response = self.http.get(&api_url).bearer_auth(token).send().await?;
        let response = error::check(response).await?;
        Ok(response.json::<Paging<PlaylistItem>>().await?)
    }

    /// Appends track URIs to the end of a playlist.
    pub async fn add_playlist_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<SnapshotResponse, error::SpotifyError> {
        let api_url = self.endpoint(&format!("/playlists/{playlist_id}/tracks"));
        let body = json!({ "uris": uris });

        let response = self
            .http
            .post(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let response = error::check(response).await?;
        Ok(response.json::<SnapshotResponse>().await?)
    }

    /// Removes tracks from a playlist by URI.
    ///
    /// Removal is by URI value, not position: every occurrence of a URI in
    /// the playlist disappears. That is the upstream contract and callers
    /// rely on it (re-running a remove is safe).
    pub async fn remove_playlist_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<SnapshotResponse, error::SpotifyError> {
        let api_url = self.endpoint(&format!("/playlists/{playlist_id}/tracks"));
        let tracks: Vec<_> = uris.iter().map(|uri| json!({ "uri": uri })).collect();
        let body = json!({ "tracks": tracks });

        let response = self
            .http
            .delete(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let response = error::check(response).await?;
        Ok(response.json::<SnapshotResponse>().await?)
    }

    /// Moves the track at `range_start` to sit before `insert_before`.
    ///
    /// Uses Spotify's range-based reorder contract. The translation from
    /// UI drag indices to this pair lives in
    /// [`crate::management::playlist::translate_reorder`]; this function is
    /// a plain pass-through.
    pub async fn reorder_playlist_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        range_start: usize,
        insert_before: usize,
    ) -> Result<SnapshotResponse, error::SpotifyError> {
        let api_url = self.endpoint(&format!("/playlists/{playlist_id}/tracks"));
        let body = json!({
            "range_start": range_start,
            "insert_before": insert_before,
        });

        let response = self
            .http
            .put(&api_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let response = error::check(response).await?;
        Ok(response.json::<SnapshotResponse>().await?)
    }
}

impl crate::management::PlaylistApi for SpotifyClient {
    async fn track_uris(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<Vec<String>, error::SpotifyError> {
        let page = self.playlist_tracks(token, playlist_id).await?;
        Ok(page
            .items
            .into_iter()
            .filter_map(|item| item.track.map(|track| track.uri))
            .collect())
    }

    async fn append_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), error::SpotifyError> {
        self.add_playlist_tracks(token, playlist_id, uris).await?;
        Ok(())
    }

    async fn remove_by_uri(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), error::SpotifyError> {
        self.remove_playlist_tracks(token, playlist_id, uris)
            .await?;
        Ok(())
    }

    async fn move_range(
        &self,
        token: &str,
        playlist_id: &str,
        range_start: usize,
        insert_before: usize,
    ) -> Result<(), error::SpotifyError> {
        self.reorder_playlist_tracks(token, playlist_id, range_start, insert_before)
            .await?;
        Ok(())
    }
}
