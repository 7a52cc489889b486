//! Delivery of downloaded audio to the user.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to hand a file to the user.
///
/// I/O errors are captured as strings so the error stays cloneable, the same
/// way `DownloadError` carries them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SaveError {
    /// Filesystem failure.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "`PermissionDenied`").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// The file name would escape the destination.
    #[error("invalid file name: {0}")]
    InvalidName(String),
}

impl SaveError {
    /// Capture a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        Self::Io {
            kind: format!("{:?}", err.kind()),
            message: err.to_string(),
        }
    }
}

/// Stores one downloaded audio file under the given name.
pub trait AudioSink: Send + Sync {
    /// Save `audio` as `file_name`, returning where it ended up.
    fn save(&self, file_name: &str, audio: &[u8]) -> Result<PathBuf, SaveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_captures_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        match SaveError::from_io_error(&io) {
            SaveError::Io { kind, message } => {
                assert_eq!(kind, "PermissionDenied");
                assert!(message.contains("nope"));
            }
            SaveError::InvalidName(_) => panic!("Expected Io variant"),
        }
    }
}
