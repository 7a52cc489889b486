//! Download pipeline configuration.

use std::path::PathBuf;
use std::time::Duration;

use speechbox_core::settings::{
    DEFAULT_CHUNK_DELAY_MS, DEFAULT_CHUNK_SIZE, DEFAULT_CLIENT_ID, DEFAULT_RELAY_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SYNTHESIS_URL,
};
use speechbox_core::Settings;

/// Configuration for [`ChunkedDownloader`](crate::ChunkedDownloader).
///
/// Use the builder methods to customize, or [`DownloadConfig::from_settings`]
/// to derive it from persisted settings.
///
/// # Example
///
/// ```
/// use speechbox_download::DownloadConfig;
/// use std::time::Duration;
///
/// let config = DownloadConfig::new()
///     .with_chunk_delay(Duration::from_millis(250))
///     .with_relay_url(None)
///     .with_output_dir("out");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Synthesis endpoint, without query string.
    pub synthesis_url: String,
    /// Value of the `client` query parameter.
    pub client_id: String,
    /// Relay prefix; `None` requests the endpoint directly.
    pub relay_url: Option<String>,
    /// Maximum characters per chunk.
    pub chunk_size: usize,
    /// Pause between consecutive chunk requests.
    pub chunk_delay: Duration,
    /// Where files are saved.
    pub output_dir: PathBuf,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// `User-Agent` header.
    pub user_agent: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            synthesis_url: DEFAULT_SYNTHESIS_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            relay_url: Some(DEFAULT_RELAY_URL.to_string()),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay: Duration::from_millis(DEFAULT_CHUNK_DELAY_MS),
            output_dir: PathBuf::from("."),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: concat!("speechbox/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl DownloadConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a configuration from settings, applying defaults for unset
    /// fields.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            synthesis_url: settings.effective_synthesis_url().to_string(),
            client_id: settings.effective_client_id().to_string(),
            relay_url: settings.effective_relay_url().map(ToString::to_string),
            chunk_size: settings.effective_chunk_size(),
            chunk_delay: Duration::from_millis(settings.effective_chunk_delay_ms()),
            output_dir: PathBuf::from(settings.effective_output_dir()),
            request_timeout: Duration::from_secs(settings.effective_request_timeout_secs()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_synthesis_url(mut self, url: impl Into<String>) -> Self {
        self.synthesis_url = url.into();
        self
    }

    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Set or clear the relay.
    #[must_use]
    pub fn with_relay_url(mut self, relay_url: Option<String>) -> Self {
        self.relay_url = relay_url;
        self
    }

    /// Set the chunk size. Zero is treated as one.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[must_use]
    pub const fn with_chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = delay;
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DownloadConfig::new();
        assert_eq!(config.chunk_size, 200);
        assert_eq!(config.chunk_delay, Duration::from_millis(500));
        assert_eq!(config.client_id, "tw-ob");
        assert_eq!(config.relay_url.as_deref(), Some("https://corsproxy.io/"));
        assert!(config.user_agent.starts_with("speechbox/"));
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            chunk_size: Some(120),
            relay_url: Some(String::new()),
            output_dir: Some("/tmp/speech".into()),
            ..Settings::default()
        };
        let config = DownloadConfig::from_settings(&settings);
        assert_eq!(config.chunk_size, 120);
        assert_eq!(config.relay_url, None);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/speech"));
        assert_eq!(config.chunk_delay, Duration::from_millis(500));
        assert_eq!(config.synthesis_url, DEFAULT_SYNTHESIS_URL);
    }

    #[test]
    fn test_builder_pattern() {
        let config = DownloadConfig::new()
            .with_synthesis_url("http://localhost:9000/tts")
            .with_client_id("test")
            .with_chunk_size(0)
            .with_chunk_delay(Duration::ZERO)
            .with_request_timeout(Duration::from_secs(5));

        assert_eq!(config.synthesis_url, "http://localhost:9000/tts");
        assert_eq!(config.client_id, "test");
        assert_eq!(config.chunk_size, 1);
        assert_eq!(config.chunk_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
