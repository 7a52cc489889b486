//! Progress events emitted by the download pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Download lifecycle notifications, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DownloadEvent {
    /// The text was split and the first request is about to go out.
    Started {
        /// Number of chunks that will be requested.
        total_chunks: usize,
    },

    /// One chunk was fetched and saved.
    ChunkSaved {
        /// 1-based chunk number.
        chunk: usize,
        /// Number of chunks in this download.
        total_chunks: usize,
        /// Where the file was written.
        path: PathBuf,
    },

    /// Every chunk was saved.
    Completed {
        /// All saved files, in chunk order.
        files: Vec<PathBuf>,
    },

    /// The download stopped early.
    Failed {
        /// The user-facing error message.
        message: String,
    },
}
