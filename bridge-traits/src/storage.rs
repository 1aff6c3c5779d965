//! Key-Value Storage Abstraction
//!
//! Provides the platform-agnostic trait for string-keyed persistent storage,
//! plus an in-process implementation for tests and ephemeral hosts.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;

/// String-keyed persistent storage trait
///
/// Abstracts the preferences-style stores each platform provides:
/// - iOS: UserDefaults
/// - Android: SharedPreferences / DataStore
/// - Desktop: SQLite-backed file (`bridge-desktop`)
/// - Web: localStorage / IndexedDB
///
/// There are no transactions and no atomic multi-key writes; callers that
/// need read-modify-write consistency must serialize their own updates.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::KeyValueStore;
///
/// async fn save_theme(store: &dyn KeyValueStore) -> Result<()> {
///     store.set("theme", "dark").await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Retrieve the value stored under `key`
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the entry for `key`; no-op if the key doesn't exist
    async fn remove(&self, key: &str) -> Result<()>;

    /// Delete every entry in the store
    ///
    /// Use with caution! This wipes all persisted app state.
    async fn clear_all(&self) -> Result<()>;

    /// List all stored keys, sorted
    ///
    /// Useful for debugging or migration scenarios.
    async fn list_keys(&self) -> Result<Vec<String>>;
}

/// In-process key-value store
///
/// Backed by a `HashMap` behind an async `RwLock`. Nothing is persisted
/// across restarts; intended for tests and for hosts that have not wired a
/// platform adapter yet.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        debug!(key = key, "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.clear();
        debug!("Cleared all entries");
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.read().await;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
