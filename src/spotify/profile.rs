use crate::{
    spotify::{SpotifyClient, error},
    types::PrivateUser,
};

impl SpotifyClient {
    /// Retrieves the authenticated user's profile.
    ///
    /// Used once after the code exchange to populate the session's user
    /// block, and again when a playlist has to be created under the user's
    /// id.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token for Spotify API authentication
    ///
    /// # Errors
    ///
    /// A revoked or expired token surfaces as
    /// [`error::SpotifyError::Unauthorized`]; the caller is expected to
    /// drop the session and require a fresh login.
    pub async fn user_profile(&self, token: &str) -> Result<PrivateUser, error::SpotifyError> {
        let response = self
            .http
            .get(self.endpoint("/me"))
            .bearer_auth(token)
            .send()
            .await?;

        let response = error::check(response).await?;
        Ok(response.json::<PrivateUser>().await?)
    }
}
