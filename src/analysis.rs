//! Client for the external audio-analysis provider.
//!
//! The provider exposes an unauthenticated batch endpoint that accepts
//! comma-joined catalog track ids and returns tempo, danceability and
//! energy per entry. Responses come back under the provider's own entry
//! ids; recovering the catalog id from the `href` field is handled by the
//! feature service on top of this client.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::{config, types::AnalysisResponse};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis provider returned {status}")]
    Upstream { status: u16 },

    #[error("analysis request failed: {0}")]
    Network(#[from] reqwest::Error),
}

pub struct AnalysisClient {
    http: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: String) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        AnalysisClient { http, base_url }
    }

    pub fn from_env() -> Self {
        Self::new(config::audio_api_url())
    }

    /// Fetches audio features for a batch of catalog track ids.
    ///
    /// Ids the provider doesn't know are simply absent from the response;
    /// that is not an error at this layer.
    pub async fn batch_features(&self, ids: &[String]) -> Result<AnalysisResponse, AnalysisError> {
        let api_url = format!(
            "{base}/audio-features?ids={ids}",
            base = self.base_url,
            ids = ids.join(","),
        );

        let response = self.http.get(&api_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<AnalysisResponse>().await?)
    }
}
