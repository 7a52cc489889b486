//! Cached voice list for engines that have no change signal of their own.

use std::sync::{Mutex, PoisonError};

use speechbox_core::{SubscriptionId, Voice, VoicesChangedListener};

use super::listeners::VoicesChangedRegistry;

/// Last voice list read from an engine, plus its subscribers.
///
/// The engine side calls [`replace`](Self::replace) whenever it re-reads its
/// voices; subscribers are notified only when the list actually differs.
/// Reads never touch the engine.
#[derive(Debug, Default)]
pub struct VoiceCatalog {
    voices: Mutex<Vec<Voice>>,
    listeners: VoicesChangedRegistry,
}

impl VoiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn voices(&self) -> Vec<Voice> {
        self.voices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store `voices`. Returns whether the list changed; listeners run after
    /// the new list is visible and with no lock held.
    pub fn replace(&self, voices: Vec<Voice>) -> bool {
        {
            let mut current = self.voices.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == voices {
                return false;
            }
            *current = voices;
        }
        self.listeners.notify();
        true
    }

    pub fn subscribe(&self, listener: VoicesChangedListener) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.unsubscribe(id);
    }
}
