//! Rebuild lifecycle events
//!
//! A broadcast channel carrying rebuild start/finish notifications, so a
//! fire-and-forget trigger can still be observed by whoever cares.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// =============================================================================
// EVENT TYPES
// =============================================================================

/// Events emitted by the reindex engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum RebuildEvent {
    /// A rebuild has started
    Started,
    /// A rebuild finished and its index was published
    Completed {
        generation: u64,
        sources: usize,
        points: usize,
        errors: usize,
        duration_ms: f64,
    },
    /// A rebuild aborted; the previous index stays current
    Failed { error: String },
    /// A trigger arrived while a rebuild was running
    Rejected,
}

// =============================================================================
// EVENT BROADCASTER
// =============================================================================

/// Broadcasts rebuild events to all subscribers
#[derive(Debug, Clone)]
pub struct RebuildEvents {
    sender: broadcast::Sender<RebuildEvent>,
}

impl RebuildEvents {
    /// Create a new broadcaster with the specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Broadcast an event to all subscribers
    /// Returns the number of receivers that received the event
    pub fn broadcast(&self, event: RebuildEvent) -> usize {
        // send() returns Err if there are no receivers, which is fine
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RebuildEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for RebuildEvents {
    fn default() -> Self {
        Self::new(256)
    }
}
