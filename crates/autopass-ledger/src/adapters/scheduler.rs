//! # In-Memory Scheduler
//!
//! Queue-backed `DeferredCallScheduler` for tests and single-process hosts.
//! A driving loop polls [`InMemoryScheduler::take_due`] with its clock and
//! feeds each due call back into the ledger's `process_expiry` entry point.
//! At-least-once delivery is simulated by requeueing a taken call.

use crate::errors::ScheduleError;
use crate::ports::outbound::{DeferredCall, DeferredCallScheduler, TaskId};
use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

/// A scheduled call awaiting delivery.
#[derive(Clone, Debug)]
pub struct PendingCall {
    /// Scheduler-assigned id.
    pub task_id: TaskId,
    /// The call to deliver.
    pub call: DeferredCall,
}

/// In-memory deferred-call queue.
#[derive(Debug, Default)]
pub struct InMemoryScheduler {
    pending: RwLock<Vec<PendingCall>>,
}

impl InMemoryScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every call whose `not_before` has passed.
    ///
    /// Calls are returned in submission order. The not-before contract is
    /// honored here; there is deliberately no upper bound on how long a
    /// call may sit in the queue before a driver picks it up.
    #[must_use]
    pub fn take_due(&self, now: u64) -> Vec<PendingCall> {
        let mut pending = self.pending.write().expect("scheduler lock poisoned");
        let (due, later): (Vec<_>, Vec<_>) = pending
            .drain(..)
            .partition(|p| p.call.not_before <= now);
        *pending = later;
        due
    }

    /// Puts a call back in the queue, simulating redelivery.
    pub fn requeue(&self, call: PendingCall) {
        self.pending
            .write()
            .expect("scheduler lock poisoned")
            .push(call);
    }

    /// Number of calls awaiting delivery.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.read().expect("scheduler lock poisoned").len()
    }
}

#[async_trait]
impl DeferredCallScheduler for InMemoryScheduler {
    async fn schedule(&self, call: DeferredCall) -> Result<TaskId, ScheduleError> {
        let task_id = Uuid::new_v4();
        self.pending
            .write()
            .expect("scheduler lock poisoned")
            .push(PendingCall { task_id, call });
        Ok(task_id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
