#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

// Dev-dependencies only used by integration tests
#[cfg(test)]
use tokio_test as _;

pub mod chunker;
pub mod config;
pub mod http;
pub mod pipeline;
pub mod sink;
pub mod url;

// Re-export key types for convenience
pub use chunker::split_into_chunks;
pub use config::DownloadConfig;
pub use http::ReqwestFetcher;
pub use pipeline::ChunkedDownloader;
pub use sink::DirectorySink;
pub use url::{build_request_url, build_synthesis_url, wrap_with_relay};
