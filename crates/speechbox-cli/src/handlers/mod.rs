//! Command handlers.
//!
//! Handlers are thin: resolve input, call into `speechbox-voice` or
//! `speechbox-download`, format the result for the terminal.

pub mod config;
pub mod download;
pub mod speak;
pub mod voices;
