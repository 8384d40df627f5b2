//! # Recording Event Sink
//!
//! `EventSink` that appends every event to an in-process log. Tests assert
//! on the log; embedding hosts can drain it into their own bus.

use crate::events::LedgerEvent;
use crate::ports::outbound::EventSink;
use async_trait::async_trait;
use std::sync::RwLock;

/// Append-only in-process event log.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: RwLock<Vec<LedgerEvent>>,
}

impl RecordingEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event emitted so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.read().expect("event lock poisoned").clone()
    }

    /// Number of events emitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().expect("event lock poisoned").len()
    }

    /// True if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventSink for RecordingEventSink {
    async fn emit(&self, event: LedgerEvent) {
        self.events
            .write()
            .expect("event lock poisoned")
            .push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
