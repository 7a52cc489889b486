//! Download error types.
//!
//! These errors are designed to be serializable and not depend on external
//! error types like `reqwest::Error`. Causes are captured as strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for download operations.
///
/// Every per-chunk variant carries the 1-based chunk number so the user can
/// tell how far the download got.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadError {
    /// The endpoint (or the relay in front of it) answered with a non-2xx status.
    #[error("Network response was not ok for chunk {chunk}. Status: {status}")]
    Status {
        /// 1-based chunk number.
        chunk: usize,
        /// HTTP status code.
        status: u16,
    },

    /// The endpoint served an HTML error page instead of audio.
    #[error("Received an error page for chunk {chunk}. The API may have rejected the request.")]
    ErrorPage {
        /// 1-based chunk number.
        chunk: usize,
    },

    /// No response was received at all.
    #[error("Request for chunk {chunk} failed: {message}")]
    Network {
        /// 1-based chunk number.
        chunk: usize,
        /// Detailed error message.
        message: String,
    },

    /// The audio was received but could not be saved.
    #[error("Could not save chunk {chunk}: {message}")]
    Save {
        /// 1-based chunk number.
        chunk: usize,
        /// Detailed error message.
        message: String,
    },

    /// Another download is already running on this downloader.
    #[error("A download is already in progress")]
    AlreadyInProgress,

    /// Download was cancelled by user.
    #[error("Download cancelled")]
    Cancelled,
}

impl DownloadError {
    /// Create a bad-status error.
    #[must_use]
    pub const fn status(chunk: usize, status: u16) -> Self {
        Self::Status { chunk, status }
    }

    /// Create an error-page error.
    #[must_use]
    pub const fn error_page(chunk: usize) -> Self {
        Self::ErrorPage { chunk }
    }

    /// Create a network error.
    pub fn network(chunk: usize, message: impl Into<String>) -> Self {
        Self::Network {
            chunk,
            message: message.into(),
        }
    }

    /// Create a save error.
    pub fn save(chunk: usize, message: impl Into<String>) -> Self {
        Self::Save {
            chunk,
            message: message.into(),
        }
    }

    /// The 1-based chunk this error is attributed to, if any.
    #[must_use]
    pub const fn chunk(&self) -> Option<usize> {
        match self {
            Self::Status { chunk, .. }
            | Self::ErrorPage { chunk }
            | Self::Network { chunk, .. }
            | Self::Save { chunk, .. } => Some(*chunk),
            Self::AlreadyInProgress | Self::Cancelled => None,
        }
    }

    /// Check if this is a cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Convert to the single message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        format!("Download failed: {self}")
    }
}

/// Convenience result type for download operations.
pub type DownloadResult<T> = Result<T, DownloadError>;
