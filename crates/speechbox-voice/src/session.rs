//! Speech session controller: one active utterance over a host speech engine.
//!
//! The controller is a two-state machine:
//!
//! ```text
//!   Idle ──speak──▶ Speaking ──end / error / cancel / drop──▶ Idle
//! ```
//!
//! `speak` while Speaking is a dropped request, not a queue. Engine
//! notifications are external triggers that may arrive on any thread at any
//! later time; each carries the id of the utterance it belongs to, and only
//! the active utterance may change state. Late notifications for a cancelled
//! utterance, or for a session that no longer exists, are ignored.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc;

use speechbox_core::domain::{find_voice, select_default_voice};
use speechbox_core::{
    SpeakingState, SpeechPlatform, SpeechRequest, SubscriptionId, Utterance, UtteranceEvent,
    UtteranceId, UtteranceNotifier, Voice,
};

// ── Events emitted by the session ──────────────────────────────────

/// Events emitted by the session to the UI / application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Speaking state changed.
    StateChanged(SpeakingState),

    /// The platform published a new voice list.
    VoicesChanged(Vec<Voice>),
}

/// What happened to a `speak` call.
///
/// Only `Dispatched` has any effect; the other variants are silent drops
/// that callers may use to explain a disabled control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// The utterance was handed to the engine.
    Dispatched(UtteranceId),
    /// The host has no speech engine.
    Unsupported,
    /// Another utterance is active.
    Busy,
    /// The text was empty or whitespace.
    EmptyText,
}

impl SpeakOutcome {
    pub const fn is_dispatched(self) -> bool {
        matches!(self, Self::Dispatched(_))
    }
}

// ── Shared state ───────────────────────────────────────────────────

struct SessionInner {
    /// The active utterance; `Some` exactly when Speaking.
    active: Option<UtteranceId>,

    /// Last published voice list.
    voices: Vec<Voice>,
}

/// State reachable from engine callbacks.
///
/// Callbacks hold a `Weak` to this so they never keep a torn-down session
/// alive.
struct SessionShared {
    inner: Mutex<SessionInner>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionShared {
    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: SessionEvent) {
        // Receiver may be gone; the session keeps working without listeners.
        let _ = self.event_tx.send(event);
    }

    /// Enter Speaking for `id` unless something else is active.
    fn try_activate(&self, id: UtteranceId) -> bool {
        let mut inner = self.lock();
        if inner.active.is_some() {
            return false;
        }
        inner.active = Some(id);
        drop(inner);
        self.emit(SessionEvent::StateChanged(SpeakingState::Speaking));
        true
    }

    /// Return to Idle. With `only`, the transition happens only if that
    /// utterance is the active one.
    fn deactivate(&self, only: Option<UtteranceId>) -> bool {
        let mut inner = self.lock();
        let Some(active) = inner.active else {
            return false;
        };
        if only.is_some_and(|id| id != active) {
            return false;
        }
        inner.active = None;
        drop(inner);
        self.emit(SessionEvent::StateChanged(SpeakingState::Idle));
        true
    }

    fn handle_utterance_event(&self, id: UtteranceId, event: UtteranceEvent) {
        match event {
            UtteranceEvent::Started => {
                if self.lock().active == Some(id) {
                    tracing::debug!(%id, "Utterance started");
                } else {
                    tracing::trace!(%id, "Ignoring start of inactive utterance");
                }
            }
            UtteranceEvent::Ended => {
                if self.deactivate(Some(id)) {
                    tracing::debug!(%id, "Utterance finished");
                }
            }
            UtteranceEvent::Failed(reason) => {
                if self.deactivate(Some(id)) {
                    tracing::warn!(%id, reason, "Utterance stopped by engine error");
                }
            }
        }
    }

    fn publish_voices(&self, voices: Vec<Voice>) {
        tracing::debug!(count = voices.len(), "Voice list updated");
        self.lock().voices.clone_from(&voices);
        self.emit(SessionEvent::VoicesChanged(voices));
    }
}

// ── Session controller ─────────────────────────────────────────────

/// Controller for live speech on one speech platform.
///
/// Owns the speaking flag and the voice list. Dropping the session cancels
/// any active utterance and releases the voices-changed subscription.
pub struct SpeechSession {
    platform: Arc<dyn SpeechPlatform>,

    /// Probed once at construction.
    supported: bool,

    shared: Arc<SessionShared>,

    subscription: Option<SubscriptionId>,

    next_utterance: AtomicU64,
}

impl SpeechSession {
    /// Create a session over `platform`.
    ///
    /// Fetches voices once immediately, then follows the platform's
    /// voices-changed signal. Returns the session and a receiver for
    /// [`SessionEvent`]s.
    pub fn new(
        platform: Arc<dyn SpeechPlatform>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let supported = platform.is_supported();

        let shared = Arc::new(SessionShared {
            inner: Mutex::new(SessionInner {
                active: None,
                voices: Vec::new(),
            }),
            event_tx,
        });

        let subscription = if supported {
            // Some platforms never signal and only populate synchronously.
            shared.publish_voices(platform.voices());

            let weak_shared = Arc::downgrade(&shared);
            let weak_platform = Arc::downgrade(&platform);
            Some(platform.subscribe_voices_changed(Arc::new(move || {
                if let (Some(shared), Some(platform)) =
                    (weak_shared.upgrade(), weak_platform.upgrade())
                {
                    shared.publish_voices(platform.voices());
                }
            })))
        } else {
            tracing::info!("Speech synthesis not supported on this platform");
            None
        };

        let session = Self {
            platform,
            supported,
            shared,
            subscription,
            next_utterance: AtomicU64::new(1),
        };

        (session, event_rx)
    }

    /// Whether the platform can speak at all.
    pub const fn is_supported(&self) -> bool {
        self.supported
    }

    /// Whether Idle after a `speak` means the audio has finished.
    pub fn reports_completion(&self) -> bool {
        self.supported && self.platform.reports_completion()
    }

    /// Current speaking state.
    pub fn state(&self) -> SpeakingState {
        if self.shared.lock().active.is_some() {
            SpeakingState::Speaking
        } else {
            SpeakingState::Idle
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.state().is_speaking()
    }

    /// Currently known voices.
    pub fn voices(&self) -> Vec<Voice> {
        self.shared.lock().voices.clone()
    }

    /// The voice to preselect: platform default, else the first one.
    pub fn default_voice(&self) -> Option<Voice> {
        select_default_voice(&self.shared.lock().voices).cloned()
    }

    /// Look up a voice by id or name.
    pub fn find_voice(&self, query: &str) -> Option<Voice> {
        find_voice(&self.shared.lock().voices, query).cloned()
    }

    /// Speak `request` unless something is already playing.
    ///
    /// Never fails: unsupported platforms, empty text and busy sessions are
    /// silent drops reported through the returned [`SpeakOutcome`].
    pub fn speak(&self, request: SpeechRequest) -> SpeakOutcome {
        if !self.supported {
            return SpeakOutcome::Unsupported;
        }
        if !request.has_text() {
            return SpeakOutcome::EmptyText;
        }

        let id = UtteranceId::new(self.next_utterance.fetch_add(1, Ordering::Relaxed));
        if !self.shared.try_activate(id) {
            tracing::debug!("Speak request dropped: already speaking");
            return SpeakOutcome::Busy;
        }

        // Clear anything the engine is still doing even though the flag said
        // Idle; notifications from that work carry a stale id and are ignored.
        self.platform.cancel_speech();

        let utterance = Utterance::from_request(id, request);
        tracing::info!(
            %id,
            voice = utterance.voice.as_ref().map_or("default", |v| v.name.as_str()),
            rate = utterance.rate,
            pitch = utterance.pitch,
            volume = utterance.volume,
            chars = utterance.text.chars().count(),
            "Speaking"
        );

        let weak = Arc::downgrade(&self.shared);
        let notifier = UtteranceNotifier::new(id, move |id, event| {
            if let Some(shared) = Weak::upgrade(&weak) {
                shared.handle_utterance_event(id, event);
            }
        });

        if let Err(e) = self.platform.speak_utterance(utterance, notifier) {
            self.shared
                .handle_utterance_event(id, UtteranceEvent::Failed(e.to_string()));
        }

        SpeakOutcome::Dispatched(id)
    }

    /// Stop speaking immediately.
    ///
    /// The flag is cleared without waiting for an end notification, which
    /// some engines never send after a cancel.
    pub fn cancel(&self) {
        if !self.supported {
            return;
        }
        self.platform.cancel_speech();
        if self.shared.deactivate(None) {
            tracing::debug!("Speech cancelled");
        }
    }
}

impl Drop for SpeechSession {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.platform.unsubscribe_voices_changed(subscription);
        }
        if self.supported && self.shared.deactivate(None) {
            tracing::debug!("Session dropped while speaking; cancelling");
            self.platform.cancel_speech();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NullSpeechPlatform;

    #[test]
    fn unsupported_platform_drops_everything() {
        let (session, mut rx) = SpeechSession::new(Arc::new(NullSpeechPlatform));
        assert!(!session.is_supported());
        assert!(!session.reports_completion());
        assert_eq!(session.speak(SpeechRequest::new("hello")), SpeakOutcome::Unsupported);
        session.cancel();
        assert_eq!(session.state(), SpeakingState::Idle);
        assert!(session.voices().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn stale_end_does_not_clear_newer_utterance() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let shared = SessionShared {
            inner: Mutex::new(SessionInner {
                active: None,
                voices: Vec::new(),
            }),
            event_tx: tx,
        };

        assert!(shared.try_activate(UtteranceId::new(2)));
        shared.handle_utterance_event(UtteranceId::new(1), UtteranceEvent::Ended);
        assert_eq!(shared.lock().active, Some(UtteranceId::new(2)));

        shared.handle_utterance_event(UtteranceId::new(2), UtteranceEvent::Ended);
        assert_eq!(shared.lock().active, None);
    }
}
