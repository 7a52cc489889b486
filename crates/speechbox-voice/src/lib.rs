#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod backend;
pub mod session;

// Re-export key types for convenience
pub use backend::{NullSpeechPlatform, VoicesChangedRegistry, default_platform};
pub use session::{SessionEvent, SpeakOutcome, SpeechSession};
