#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod download;
pub mod ports;
pub mod settings;

// Re-export the types almost every consumer needs
pub use domain::{SpeakingState, SpeechRequest, Utterance, UtteranceId, Voice};
pub use download::{DownloadError, DownloadEvent, DownloadOutcome, DownloadResult, TextChunk};
pub use ports::{
    AudioFetcher, AudioSink, FetchError, FetchedAudio, PlatformError, SaveError, SpeechPlatform,
    SubscriptionId, UtteranceEvent, UtteranceNotifier, VoicesChangedListener,
};
pub use settings::{Settings, SettingsError, SettingsUpdate, validate_settings};
