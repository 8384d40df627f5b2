//! # In-Memory Store
//!
//! `KeyValueStore` over a process-local map. Used by tests and by hosts that
//! bring their own durability underneath; the production store on the target
//! platform is the chain's datastore behind the same port.

use crate::errors::StoreError;
use crate::ports::outbound::{KeyValueStore, WriteBatch};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().expect("store lock poisoned").len()
    }

    /// True if no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .data
            .read()
            .expect("store lock poisoned")
            .get(key)
            .cloned())
    }

    async fn contains(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self
            .data
            .read()
            .expect("store lock poisoned")
            .contains_key(key))
    }

    async fn apply(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut data = self.data.write().expect("store lock poisoned");
        for (key, value) in batch.into_entries() {
            data.insert(key, value);
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
