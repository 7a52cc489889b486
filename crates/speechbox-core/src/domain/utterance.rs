//! Speech requests, utterances and the speaking flag.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::voice::Voice;

/// Normal speaking rate.
pub const DEFAULT_RATE: f32 = 1.0;
/// Normal pitch.
pub const DEFAULT_PITCH: f32 = 1.0;
/// Full volume.
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Rates accepted by host speech engines (1.0 = normal).
pub const RATE_RANGE: RangeInclusive<f32> = 0.1..=10.0;
/// Pitches accepted by host speech engines (1.0 = normal).
pub const PITCH_RANGE: RangeInclusive<f32> = 0.0..=2.0;
/// Volume, 0.0 = muted, 1.0 = full.
pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// What the caller asks the controller to say.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Text to speak. Must contain non-whitespace to be accepted.
    pub text: String,

    /// Voice to use; `None` lets the platform pick its default.
    pub voice: Option<Voice>,

    /// Speaking rate multiplier.
    pub rate: f32,

    /// Pitch multiplier.
    pub pitch: f32,

    /// Volume in `[0, 1]`.
    pub volume: f32,
}

impl SpeechRequest {
    /// Create a request with default voice and prosody.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            rate: DEFAULT_RATE,
            pitch: DEFAULT_PITCH,
            volume: DEFAULT_VOLUME,
        }
    }

    #[must_use]
    pub fn with_voice(mut self, voice: Option<Voice>) -> Self {
        self.voice = voice;
        self
    }

    #[must_use]
    pub const fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    #[must_use]
    pub const fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    #[must_use]
    pub const fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    /// Whether the text contains anything worth speaking.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Identifier the controller assigns to each dispatched utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtteranceId(u64);

impl UtteranceId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "utt-{}", self.0)
    }
}

/// A speech request after validation, ready for the platform.
///
/// Prosody values are clamped into the ranges host engines accept;
/// non-finite values fall back to the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    /// Build an utterance from a request.
    pub fn from_request(id: UtteranceId, request: SpeechRequest) -> Self {
        Self {
            id,
            rate: clamp_or(request.rate, &RATE_RANGE, DEFAULT_RATE),
            pitch: clamp_or(request.pitch, &PITCH_RANGE, DEFAULT_PITCH),
            volume: clamp_or(request.volume, &VOLUME_RANGE, DEFAULT_VOLUME),
            text: request.text,
            voice: request.voice,
        }
    }
}

fn clamp_or(value: f32, range: &RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        fallback
    }
}

/// Whether an utterance is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakingState {
    /// Nothing is playing.
    #[default]
    Idle,

    /// One utterance is active.
    Speaking,
}

impl SpeakingState {
    pub const fn is_speaking(self) -> bool {
        matches!(self, Self::Speaking)
    }
}

impl fmt::Display for SpeakingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Speaking => f.write_str("speaking"),
        }
    }
}
