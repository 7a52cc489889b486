#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary target only
use dotenvy as _;
use tracing_subscriber as _;

pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod input;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use commands::{Commands, DownloadArgs, SpeakArgs, TextSource};
pub use config::load_settings;
pub use error::CliError;
pub use parser::Cli;
