//! Voices-changed subscriber bookkeeping shared by platform implementations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use speechbox_core::{SubscriptionId, VoicesChangedListener};

/// Registry of voices-changed listeners.
///
/// Listeners are invoked with no lock held, so a listener may call back into
/// the platform (typically `voices()`) or even unsubscribe itself.
#[derive(Default)]
pub struct VoicesChangedRegistry {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(SubscriptionId, VoicesChangedListener)>>,
}

impl VoicesChangedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: VoicesChangedListener) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(existing, _)| *existing != id);
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fire every registered listener once.
    pub fn notify(&self) {
        let snapshot: Vec<VoicesChangedListener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in snapshot {
            listener();
        }
    }
}

impl std::fmt::Debug for VoicesChangedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoicesChangedRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}
