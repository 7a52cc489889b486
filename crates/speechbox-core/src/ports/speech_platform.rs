//! Host speech synthesis capability.
//!
//! # Design Rules
//!
//! - The platform owns voices and playback; callers own the speaking state.
//! - Completion notifications may arrive on any thread, at any later time,
//!   including after the caller has stopped caring. Implementations only
//!   forward them through the [`UtteranceNotifier`] they were given.
//! - `cancel_speech` must be safe to call at any time, any number of times.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::{Utterance, UtteranceId, Voice};

/// Lifecycle notification for one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceEvent {
    /// Audio output began.
    Started,
    /// Audio output finished normally.
    Ended,
    /// The engine gave up on the utterance.
    Failed(String),
}

/// Receiver of utterance notifications.
pub type UtteranceCallback = Arc<dyn Fn(UtteranceId, UtteranceEvent) + Send + Sync>;

/// Handle a platform uses to report progress of a single utterance.
///
/// Cloneable so engines with separate start/end hooks can keep one copy per
/// hook.
#[derive(Clone)]
pub struct UtteranceNotifier {
    id: UtteranceId,
    callback: UtteranceCallback,
}

impl UtteranceNotifier {
    pub fn new(
        id: UtteranceId,
        callback: impl Fn(UtteranceId, UtteranceEvent) + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            callback: Arc::new(callback),
        }
    }

    /// The utterance this notifier reports on.
    pub const fn id(&self) -> UtteranceId {
        self.id
    }

    pub fn started(&self) {
        (self.callback)(self.id, UtteranceEvent::Started);
    }

    pub fn ended(&self) {
        (self.callback)(self.id, UtteranceEvent::Ended);
    }

    pub fn failed(&self, reason: impl Into<String>) {
        (self.callback)(self.id, UtteranceEvent::Failed(reason.into()));
    }
}

impl fmt::Debug for UtteranceNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UtteranceNotifier")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Called when the platform's voice list may have changed.
///
/// Listeners re-query [`SpeechPlatform::voices`]; the signal carries no data.
pub type VoicesChangedListener = Arc<dyn Fn() + Send + Sync>;

/// Token returned by [`SpeechPlatform::subscribe_voices_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Errors a platform can report synchronously when asked to speak.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The host has no speech synthesis capability.
    #[error("Speech synthesis is not supported on this system")]
    Unsupported,

    /// The engine rejected the utterance.
    #[error("Speech engine error: {0}")]
    Engine(String),
}

/// On-device speech synthesis.
pub trait SpeechPlatform: Send + Sync {
    /// Whether the host exposes a speech engine at all.
    fn is_supported(&self) -> bool;

    /// Whether the engine tells when playback really ends.
    ///
    /// Engines that cannot report it end each utterance right after
    /// dispatch, while the audio may still be playing.
    fn reports_completion(&self) -> bool {
        true
    }

    /// Currently known voices. May be empty until the platform has loaded them.
    fn voices(&self) -> Vec<Voice>;

    /// Start speaking `utterance`, reporting its lifecycle through `notifier`.
    fn speak_utterance(
        &self,
        utterance: Utterance,
        notifier: UtteranceNotifier,
    ) -> Result<(), PlatformError>;

    /// Stop all speech immediately.
    fn cancel_speech(&self);

    /// Register for voices-changed signals.
    fn subscribe_voices_changed(&self, listener: VoicesChangedListener) -> SubscriptionId;

    /// Drop a registration. Unknown ids are ignored.
    fn unsubscribe_voices_changed(&self, id: SubscriptionId);
}
