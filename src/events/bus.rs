//! Event bus - pub/sub channel between the task store and presentation
//!
//! Uses a tokio broadcast channel. The store emits, consumers (UI, loggers)
//! subscribe. Emission is fire-and-forget: with no subscribers the event is
//! simply dropped, which keeps the store free of any rendering dependency.

use tokio::sync::broadcast;
use tracing::debug;

use super::types::TaskEvent;

/// Default channel capacity (events)
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Notification channel for task store state transitions
pub struct EventBus {
    tx: broadcast::Sender<TaskEvent>,
}

impl EventBus {
    /// Create a new event bus with the given capacity
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "EventBus::new: creating event bus");
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Create a new event bus with default capacity
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Emit an event to all subscribers
    ///
    /// Fire-and-forget: if there are no subscribers, the event is dropped.
    pub fn emit(&self, event: TaskEvent) {
        debug!(event_type = event.event_type(), task_id = event.task_id(), "EventBus::emit");
        let _ = self.tx.send(event);
    }

    /// Subscribe to receive events emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        debug!("EventBus::subscribe: new subscriber");
        self.tx.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
