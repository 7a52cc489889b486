//! Settings domain types and validation.
//!
//! This module contains the settings that tune the download pipeline.
//! These are pure domain types with no infrastructure dependencies.

use serde::{Deserialize, Serialize};

/// Maximum characters per remote synthesis request.
pub const DEFAULT_CHUNK_SIZE: usize = 200;

/// Pause between consecutive chunk requests, in milliseconds.
pub const DEFAULT_CHUNK_DELAY_MS: u64 = 500;

/// Remote synthesis endpoint.
pub const DEFAULT_SYNTHESIS_URL: &str = "https://translate.google.com/translate_tts";

/// Client identifier sent to the synthesis endpoint.
pub const DEFAULT_CLIENT_ID: &str = "tw-ob";

/// Relay that forwards requests to the synthesis endpoint.
pub const DEFAULT_RELAY_URL: &str = "https://corsproxy.io/";

/// HTTP request timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum characters per chunk (1-5000).
    pub chunk_size: Option<usize>,

    /// Delay between chunk requests in milliseconds (0-60000).
    pub chunk_delay_ms: Option<u64>,

    /// Synthesis endpoint URL (without query string).
    pub synthesis_url: Option<String>,

    /// Client identifier passed to the synthesis endpoint.
    pub client_id: Option<String>,

    /// Relay URL. An empty string disables the relay.
    pub relay_url: Option<String>,

    /// Directory downloaded files are saved into.
    pub output_dir: Option<String>,

    /// HTTP request timeout in seconds (1-600).
    pub request_timeout_secs: Option<u64>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            chunk_size: Some(DEFAULT_CHUNK_SIZE),
            chunk_delay_ms: Some(DEFAULT_CHUNK_DELAY_MS),
            synthesis_url: Some(DEFAULT_SYNTHESIS_URL.to_string()),
            client_id: Some(DEFAULT_CLIENT_ID.to_string()),
            relay_url: Some(DEFAULT_RELAY_URL.to_string()),
            output_dir: Some(".".to_string()),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Get the effective chunk size (with default fallback).
    #[must_use]
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    /// Get the effective inter-chunk delay in milliseconds.
    #[must_use]
    pub fn effective_chunk_delay_ms(&self) -> u64 {
        self.chunk_delay_ms.unwrap_or(DEFAULT_CHUNK_DELAY_MS)
    }

    /// Get the effective synthesis endpoint.
    #[must_use]
    pub fn effective_synthesis_url(&self) -> &str {
        self.synthesis_url.as_deref().unwrap_or(DEFAULT_SYNTHESIS_URL)
    }

    /// Get the effective client identifier.
    #[must_use]
    pub fn effective_client_id(&self) -> &str {
        self.client_id.as_deref().unwrap_or(DEFAULT_CLIENT_ID)
    }

    /// Get the relay URL, or `None` when the relay is disabled.
    #[must_use]
    pub fn effective_relay_url(&self) -> Option<&str> {
        match self.relay_url.as_deref() {
            None => Some(DEFAULT_RELAY_URL),
            Some(url) if url.trim().is_empty() => None,
            Some(url) => Some(url),
        }
    }

    /// Get the effective output directory.
    #[must_use]
    pub fn effective_output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(".")
    }

    /// Get the effective request timeout in seconds.
    #[must_use]
    pub fn effective_request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref size) = other.chunk_size {
            self.chunk_size = *size;
        }
        if let Some(ref delay) = other.chunk_delay_ms {
            self.chunk_delay_ms = *delay;
        }
        if let Some(ref url) = other.synthesis_url {
            self.synthesis_url.clone_from(url);
        }
        if let Some(ref client) = other.client_id {
            self.client_id.clone_from(client);
        }
        if let Some(ref relay) = other.relay_url {
            self.relay_url.clone_from(relay);
        }
        if let Some(ref dir) = other.output_dir {
            self.output_dir.clone_from(dir);
        }
        if let Some(ref timeout) = other.request_timeout_secs {
            self.request_timeout_secs = *timeout;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = set field to None/null
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub chunk_size: Option<Option<usize>>,
    pub chunk_delay_ms: Option<Option<u64>>,
    pub synthesis_url: Option<Option<String>>,
    pub client_id: Option<Option<String>>,
    pub relay_url: Option<Option<String>>,
    pub output_dir: Option<Option<String>>,
    pub request_timeout_secs: Option<Option<u64>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Chunk size must be between 1 and 5000 characters, got {0}")]
    InvalidChunkSize(usize),

    #[error("Chunk delay must be at most 60000 ms, got {0}")]
    InvalidChunkDelay(u64),

    #[error("Request timeout must be between 1 and 600 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("{field} must be an http(s) URL, got '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Client id cannot be empty")]
    EmptyClientId,

    #[error("Output directory cannot be empty")]
    EmptyOutputDir,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(size) = settings.chunk_size {
        if !(1..=5000).contains(&size) {
            return Err(SettingsError::InvalidChunkSize(size));
        }
    }

    if let Some(delay) = settings.chunk_delay_ms {
        if delay > 60_000 {
            return Err(SettingsError::InvalidChunkDelay(delay));
        }
    }

    if let Some(timeout) = settings.request_timeout_secs {
        if !(1..=600).contains(&timeout) {
            return Err(SettingsError::InvalidTimeout(timeout));
        }
    }

    if let Some(ref url) = settings.synthesis_url {
        check_url("synthesis_url", url)?;
    }

    // Empty relay means "no relay" and is allowed
    if let Some(ref url) = settings.relay_url {
        if !url.trim().is_empty() {
            check_url("relay_url", url)?;
        }
    }

    if settings
        .client_id
        .as_ref()
        .is_some_and(|c| c.trim().is_empty())
    {
        return Err(SettingsError::EmptyClientId);
    }

    if settings
        .output_dir
        .as_ref()
        .is_some_and(|d| d.trim().is_empty())
    {
        return Err(SettingsError::EmptyOutputDir);
    }

    Ok(())
}

fn check_url(field: &'static str, value: &str) -> Result<(), SettingsError> {
    let value = value.trim();
    if value.starts_with("https://") || value.starts_with("http://") {
        Ok(())
    } else {
        Err(SettingsError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::with_defaults();
        assert_eq!(settings.chunk_size, Some(200));
        assert_eq!(settings.chunk_delay_ms, Some(500));
        assert_eq!(settings.client_id.as_deref(), Some("tw-ob"));
        assert_eq!(settings.effective_relay_url(), Some(DEFAULT_RELAY_URL));
    }

    #[test]
    fn test_effective_values_fall_back() {
        let settings = Settings::default();
        assert_eq!(settings.effective_chunk_size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(settings.effective_chunk_delay_ms(), DEFAULT_CHUNK_DELAY_MS);
        assert_eq!(settings.effective_synthesis_url(), DEFAULT_SYNTHESIS_URL);
        assert_eq!(settings.effective_output_dir(), ".");
        assert_eq!(settings.effective_request_timeout_secs(), 30);
    }

    #[test]
    fn test_empty_relay_disables_relay() {
        let settings = Settings {
            relay_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(settings.effective_relay_url(), None);
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_validate_settings_valid() {
        assert!(validate_settings(&Settings::with_defaults()).is_ok());
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_validate_chunk_size_bounds() {
        let zero = Settings {
            chunk_size: Some(0),
            ..Default::default()
        };
        assert_eq!(
            validate_settings(&zero),
            Err(SettingsError::InvalidChunkSize(0))
        );

        let huge = Settings {
            chunk_size: Some(10_000),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&huge),
            Err(SettingsError::InvalidChunkSize(10_000))
        ));
    }

    #[test]
    fn test_validate_delay_and_timeout() {
        let slow = Settings {
            chunk_delay_ms: Some(120_000),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&slow),
            Err(SettingsError::InvalidChunkDelay(120_000))
        ));

        let no_timeout = Settings {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&no_timeout),
            Err(SettingsError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_validate_urls() {
        let bad = Settings {
            synthesis_url: Some("ftp://example.com".into()),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&bad),
            Err(SettingsError::InvalidUrl {
                field: "synthesis_url",
                ..
            })
        ));

        let bad_relay = Settings {
            relay_url: Some("corsproxy.io".into()),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&bad_relay),
            Err(SettingsError::InvalidUrl {
                field: "relay_url",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_empty_strings() {
        let settings = Settings {
            client_id: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(validate_settings(&settings), Err(SettingsError::EmptyClientId));

        let settings = Settings {
            output_dir: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(validate_settings(&settings), Err(SettingsError::EmptyOutputDir));
    }

    #[test]
    fn test_merge_partial_update() {
        let mut settings = Settings::with_defaults();
        let update = SettingsUpdate {
            chunk_size: Some(Some(120)),
            relay_url: Some(Some(String::new())),
            output_dir: Some(None),
            ..Default::default()
        };
        settings.merge(&update);

        assert_eq!(settings.chunk_size, Some(120));
        assert_eq!(settings.effective_relay_url(), None);
        assert_eq!(settings.output_dir, None);
        // Untouched
        assert_eq!(settings.chunk_delay_ms, Some(500));
    }

    #[test]
    fn test_settings_json_roundtrip_with_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{"chunk_size": 150}"#).unwrap();
        assert_eq!(settings.chunk_size, Some(150));
        assert_eq!(settings.relay_url, None);
    }
}
