//! HTTP retrieval of synthesized audio.
//!
//! [`ReqwestFetcher`] is the production [`AudioFetcher`]. It never retries:
//! the pipeline reports the first failure, so a retry policy would hide the
//! chunk that actually failed.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use speechbox_core::{AudioFetcher, FetchError, FetchedAudio};

use crate::config::DownloadConfig;

// ============================================================================
// Reqwest Fetcher
// ============================================================================

/// Production fetcher using reqwest.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Create a fetcher with the configured timeout and user agent.
    pub fn new(config: &DownloadConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

fn map_reqwest_error(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_builder() {
        FetchError::InvalidUrl(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}

#[async_trait]
impl AudioFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedAudio, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(ToString::to_string);

        tracing::debug!(status, content_type = ?content_type, "Received response");

        let body = response.bytes().await.map_err(|e| map_reqwest_error(&e))?;

        Ok(FetchedAudio {
            status,
            content_type,
            body,
        })
    }
}

// ============================================================================
// Fake Fetcher for Testing
// ============================================================================
