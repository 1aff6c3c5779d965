//! Per-key write serialization
//!
//! The backing store has no transactions, so an unserialized
//! read-modify-write cycle can lose updates when two mutations interleave.
//! `KeyedLocks` hands out one async mutex per storage key; every mutation
//! acquires its key's mutex before reading and holds it across the write,
//! giving FIFO ordering per key.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub(crate) struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Acquire the mutex for `key`, creating it on first use
    pub(crate) async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(key.to_string()).or_default())
        };
        lock.lock_owned().await
    }
}
