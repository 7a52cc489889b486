//! Domain types for on-device speech.
//!
//! These are pure data types. The platform that produces voices and plays
//! utterances is reached through [`crate::ports::SpeechPlatform`].

mod utterance;
mod voice;

pub use utterance::{
    DEFAULT_PITCH, DEFAULT_RATE, DEFAULT_VOLUME, PITCH_RANGE, RATE_RANGE, SpeakingState,
    SpeechRequest, Utterance, UtteranceId, VOLUME_RANGE,
};
pub use voice::{DEFAULT_LANGUAGE_CODE, Voice, find_voice, language_code, select_default_voice};
