//! Event types and event bus
//!
//! Every mutation of the log emits a `GymlogEvent` on the in-process bus;
//! the UI service mirrors the stream to connected clients over SSE. Events
//! are serialized as a tagged JSON object.

use crate::records::SetRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Gymlog event types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GymlogEvent {
    /// One set logged through the form
    SetLogged {
        record: SetRecord,
        owner: String,
        timestamp: DateTime<Utc>,
    },

    /// Bulk import appended records
    SetsImported {
        count: usize,
        owner: String,
        timestamp: DateTime<Utc>,
    },

    /// A record was deleted by position
    RecordDeleted {
        index: usize,
        owner: String,
        timestamp: DateTime<Utc>,
    },

    /// The whole log was truncated
    LogCleared {
        owner: String,
        timestamp: DateTime<Utc>,
    },

    /// A catalog entry was added
    CatalogChanged {
        name: String,
        owner: String,
        timestamp: DateTime<Utc>,
    },
}

/// Central event distribution bus
///
/// Uses tokio::broadcast internally: publishing never blocks, slow
/// subscribers lag and drop rather than stall producers, and receivers
/// clean up when dropped.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<GymlogEvent>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<GymlogEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring whether anyone is listening
    ///
    /// Mirroring is best-effort; an event with no subscribers is dropped.
    pub fn emit_lossy(&self, event: GymlogEvent) {
        let _ = self.tx.send(event);
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::build_record;

    #[tokio::test]
    async fn subscriber_receives_emitted_event() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.emit_lossy(GymlogEvent::SetLogged {
            record: build_record("Squat", "2024-01-01", 5, 100.0, 1).unwrap(),
            owner: "local".to_string(),
            timestamp: Utc::now(),
        });

        match rx.recv().await.unwrap() {
            GymlogEvent::SetLogged { record, owner, .. } => {
                assert_eq!(record.exercise, "Squat");
                assert_eq!(owner, "local");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn emit_without_subscribers_is_silent() {
        let bus = EventBus::new(16);
        assert_eq!(bus.subscriber_count(), 0);
        bus.emit_lossy(GymlogEvent::LogCleared {
            owner: "local".to_string(),
            timestamp: Utc::now(),
        });
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = GymlogEvent::SetsImported {
            count: 2,
            owner: "local".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SetsImported");
        assert_eq!(json["count"], 2);
    }
}
