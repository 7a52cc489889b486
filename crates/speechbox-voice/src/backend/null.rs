//! Platform without a speech engine.

use speechbox_core::{
    PlatformError, SpeechPlatform, SubscriptionId, Utterance, UtteranceNotifier,
    VoicesChangedListener, Voice,
};

/// A [`SpeechPlatform`] that cannot speak.
///
/// Used when the build has no engine or the host engine failed to start.
/// Every query answers "nothing"; `speak_utterance` reports
/// [`PlatformError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpeechPlatform;

impl SpeechPlatform for NullSpeechPlatform {
    fn is_supported(&self) -> bool {
        false
    }

    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak_utterance(
        &self,
        _utterance: Utterance,
        _notifier: UtteranceNotifier,
    ) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported)
    }

    fn cancel_speech(&self) {}

    fn subscribe_voices_changed(&self, _listener: VoicesChangedListener) -> SubscriptionId {
        SubscriptionId::new(0)
    }

    fn unsubscribe_voices_changed(&self, _id: SubscriptionId) {}
}
