//! Chunk and outcome types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File name used when the text fits in a single chunk.
const SINGLE_FILE_NAME: &str = "speech.mp3";

/// A bounded piece of the input text, requested as one remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// 0-based position in the chunk sequence.
    pub index: usize,
    /// Trimmed, non-empty text.
    pub text: String,
}

impl TextChunk {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// 1-based chunk number, as shown to users and used in file names.
    pub const fn number(&self) -> usize {
        self.index + 1
    }

    /// Name of the file this chunk is saved as, given the total chunk count.
    pub fn file_name(&self, total: usize) -> String {
        if total == 1 {
            SINGLE_FILE_NAME.to_string()
        } else {
            format!("speech_part_{}.mp3", self.number())
        }
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Result of a download that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownloadOutcome {
    /// The input text was empty; nothing was requested.
    Skipped,

    /// Every chunk was fetched and saved.
    Completed {
        /// Saved files in chunk order.
        files: Vec<PathBuf>,
    },
}

impl DownloadOutcome {
    /// Saved files (empty when skipped).
    pub fn files(&self) -> &[PathBuf] {
        match self {
            Self::Skipped => &[],
            Self::Completed { files } => files,
        }
    }

    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}
