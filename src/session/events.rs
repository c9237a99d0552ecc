//! Broadcasting session events to subscribers.

use crossbeam_channel::{bounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::types::{DropReason, SessionConfig, SessionEvent, SessionHandle, SubscriptionId};

/// Fans session events out to bounded subscriber channels.
///
/// A subscriber whose buffer is full, or whose receiver has been dropped, is
/// removed on the next broadcast and sent a final [`SessionEvent::Dropped`].
pub struct EventBroadcaster {
    senders: RwLock<HashMap<SubscriptionId, Sender<SessionEvent>>>,
    next_id: AtomicU64,
    buffer_size: usize,
}

impl EventBroadcaster {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            senders: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            buffer_size: buffer_size.max(1),
        }
    }

    pub fn subscribe(&self) -> SessionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(self.buffer_size);
        self.senders.write().insert(id, sender);
        debug!(subscription = id.0, "session subscriber added");

        SessionHandle { id, receiver }
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        let removed = self.senders.write().remove(&id);
        if let Some(sender) = removed {
            notify_dropped(&sender, DropReason::Unsubscribed);
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.senders.read().len()
    }

    /// Send an event to every subscriber without blocking.
    pub fn broadcast(&self, event: SessionEvent) {
        let stale: Vec<SubscriptionId> = self
            .senders
            .read()
            .iter()
            .filter(|(_, sender)| sender.try_send(event.clone()).is_err())
            .map(|(id, _)| *id)
            .collect();

        if stale.is_empty() {
            return;
        }

        let mut senders = self.senders.write();
        for id in stale {
            if let Some(sender) = senders.remove(&id) {
                debug!(subscription = id.0, "dropping session subscriber that fell behind");
                notify_dropped(&sender, DropReason::BufferOverflow);
            }
        }
    }
}

/// Last message on a subscription. Lost if the buffer is still full.
fn notify_dropped(sender: &Sender<SessionEvent>, reason: DropReason) {
    let _ = sender.try_send(SessionEvent::Dropped { reason });
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new(SessionConfig::default().event_buffer_size)
    }
}
