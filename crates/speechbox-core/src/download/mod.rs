//! Download domain types.
//!
//! Shared by the download pipeline and anything that displays its progress.

mod errors;
mod events;
mod types;

pub use errors::{DownloadError, DownloadResult};
pub use events::DownloadEvent;
pub use types::{DownloadOutcome, TextChunk};
