//! HTTP retrieval of synthesized audio.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// A fully-read HTTP response.
///
/// The status is kept rather than turned into an error so the caller can
/// attribute failures to the chunk being fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAudio {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header, if present.
    pub content_type: Option<String>,
    /// Response body.
    pub body: Bytes,
}

impl FetchedAudio {
    /// A 200 response with the given content type.
    pub fn ok(content_type: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.into()),
            body: body.into(),
        }
    }

    /// An empty response with the given status.
    pub const fn with_status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Bytes::new(),
        }
    }

    /// 2xx status.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// The body is an HTML page rather than audio.
    ///
    /// The synthesis endpoint signals rejection by serving an error page with
    /// a 200 status, so this is its only error channel.
    pub fn is_markup(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("html"))
    }
}

/// Transport-level failure: no usable HTTP response was received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, TLS, or body read failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Performs a GET and returns the whole response.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedAudio, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        assert!(FetchedAudio::with_status(200).is_success());
        assert!(FetchedAudio::with_status(204).is_success());
        assert!(!FetchedAudio::with_status(199).is_success());
        assert!(!FetchedAudio::with_status(302).is_success());
        assert!(!FetchedAudio::with_status(500).is_success());
    }

    #[test]
    fn markup_detection() {
        assert!(FetchedAudio::ok("text/html; charset=UTF-8", "x").is_markup());
        assert!(FetchedAudio::ok("application/xhtml+xml", "x").is_markup());
        assert!(FetchedAudio::ok("TEXT/HTML", "x").is_markup());
        assert!(!FetchedAudio::ok("audio/mpeg", "x").is_markup());
        assert!(!FetchedAudio::with_status(200).is_markup());
    }
}
