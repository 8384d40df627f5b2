//! # Driven Ports (Outbound)
//!
//! Interfaces the ledger depends on. The host platform implements these to
//! provide durable storage, deferred-call delivery, and event publication.
//! Dependencies point inward: adapters implement these traits, the service
//! only sees the traits.

use crate::domain::codec::{decode_u64, encode_u64};
use crate::domain::keys::StoreKey;
use crate::domain::value_objects::SubscriptionId;
use crate::errors::{DecodeError, ScheduleError, StoreError};
use crate::events::LedgerEvent;
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

// =============================================================================
// WRITE BATCH
// =============================================================================

/// The staged writes of one call, committed all-or-nothing.
///
/// Reads during a call go through the batch first so a call observes its own
/// staged writes; the last write to a key wins. A batch that is never
/// applied leaves the store untouched, which is how failed calls roll back.
#[derive(Clone, Debug, Default)]
pub struct WriteBatch {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    index: HashMap<Vec<u8>, usize>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a write. A later write to the same key replaces it.
    pub fn set(&mut self, key: &StoreKey<'_>, value: Vec<u8>) {
        self.set_raw(key.to_bytes(), value);
    }

    /// Stages a write under a raw byte key.
    pub fn set_raw(&mut self, key: Vec<u8>, value: Vec<u8>) {
        match self.index.get(&key) {
            Some(&at) => self.entries[at].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Returns the staged value for a key, if any.
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.index.get(key).map(|&at| self.entries[at].1.as_slice())
    }

    /// Number of distinct keys staged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the batch into `(key, value)` pairs, one per key.
    #[must_use]
    pub fn into_entries(self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.entries
    }
}

// =============================================================================
// KEY-VALUE STORE
// =============================================================================

/// The durable byte-keyed store.
///
/// Every read is a discrete call; the store does no caching on the ledger's
/// behalf. Writes only land through [`KeyValueStore::apply`], which must be
/// atomic: either every entry of the batch persists or none does.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Returns true if `key` holds a value.
    async fn contains(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Atomically persists every entry of the batch.
    async fn apply(&self, batch: WriteBatch) -> Result<(), StoreError>;
}

// =============================================================================
// DEFERRED CALL SCHEDULER
// =============================================================================

/// Identifier the scheduler assigns to an accepted deferred call.
pub type TaskId = Uuid;

/// Entry-point name for deferred expiry/renewal processing.
pub const PROCESS_EXPIRY_ENTRY: &str = "process_expiry";

/// A future self-invocation handed to the external scheduler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeferredCall {
    /// Name of the entry point to invoke.
    pub entry_point: String,
    /// Encoded arguments for the entry point.
    pub args: Vec<u8>,
    /// Earliest delivery time (unix seconds).
    pub not_before: u64,
}

impl DeferredCall {
    /// Builds the expiry/renewal callback for a subscription.
    #[must_use]
    pub fn process_expiry(sub_id: SubscriptionId, not_before: u64) -> Self {
        Self {
            entry_point: PROCESS_EXPIRY_ENTRY.to_string(),
            args: encode_u64(sub_id.raw()),
            not_before,
        }
    }

    /// Decodes the subscription id out of a `process_expiry` call's args.
    pub fn subscription_id(&self) -> Result<SubscriptionId, DecodeError> {
        decode_u64(&self.args).map(Into::into)
    }
}

/// The external deferred-call facility.
///
/// Delivery contract: **at-least-once**, never before `not_before`, with no
/// upper bound on delay. There is no cancellation primitive — once accepted
/// a call will eventually fire, possibly more than once, and the receiving
/// entry point must re-validate live state on every delivery.
#[async_trait]
pub trait DeferredCallScheduler: Send + Sync {
    /// Submits a call for future delivery.
    async fn schedule(&self, call: DeferredCall) -> Result<TaskId, ScheduleError>;
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Append-only observability sink. Fire-and-forget: emission cannot fail a
/// call and the ledger never reads events back.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publishes one event.
    async fn emit(&self, event: LedgerEvent);
}

// =============================================================================
// TESTS
// =============================================================================
