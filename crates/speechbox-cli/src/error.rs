//! CLI-specific error types and mappings.
//!
//! Maps library errors to exit codes and user-facing messages.

use speechbox_core::{DownloadError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument or input error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Speech engine missing or failing.
    #[error("{0}")]
    Speech(String),

    /// A download failed; carries the full user message.
    #[error("{0}")]
    Download(String),

    /// The user interrupted the operation.
    #[error("Interrupted")]
    Interrupted,
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    /// - 130: Terminated by Ctrl-C
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,  // EX_USAGE
            Self::Io(_) => 74,        // EX_IOERR
            Self::Config(_) => 78,    // EX_CONFIG
            Self::Speech(_) => 69,    // EX_UNAVAILABLE
            Self::Download(_) => 1,
            Self::Interrupted => 130,
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<DownloadError> for CliError {
    fn from(err: DownloadError) -> Self {
        if err.is_cancelled() {
            Self::Interrupted
        } else {
            Self::Download(err.user_message())
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
