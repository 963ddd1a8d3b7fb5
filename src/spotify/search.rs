use crate::{
    spotify::{SpotifyClient, error},
    types::SearchResponse,
};

impl SpotifyClient {
    /// Searches the catalog for tracks.
    ///
    /// Issues a `type=track` search with the given paging window and
    /// returns the raw paging object; shaping for the UI happens in the
    /// route handler.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token for Spotify API authentication
    /// * `query` - Free-text search query
    /// * `limit` - Page size (1-50)
    /// * `offset` - Paging offset into the result set
    ///
    /// # Example
    ///
    /// ```
    /// let results = client.search_tracks(&token, "daft punk", 20, 0).await?;
    /// println!("found {} tracks", results.tracks.items.len());
    /// ```
    pub async fn search_tracks(
        &self,
        token: &str,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SearchResponse, error::SpotifyError> {
        let api_url = format!(
            "{uri}?q={query}&type=track&limit={limit}&offset={offset}",
            uri = self.endpoint("/search"),
            query = urlencoding::encode(query),
        );

        let response = self.http.get(&api_url).bearer_auth(token).send().await?;
        let response = error::check(response).await?;
        Ok(response.json::<SearchResponse>().await?)
    }
}
