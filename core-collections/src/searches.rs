//! Recent searches store
//!
//! Most-recent-first list of search terms, bounded to
//! [`RECENT_SEARCH_CAPACITY`] entries, unique case-insensitively, persisted
//! under [`keys::RECENT_SEARCHES`].

use std::sync::Arc;

use bridge_traits::storage::KeyValueStore;
use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::keys;
use crate::sync::KeyedLocks;

/// Maximum number of retained search terms
pub const RECENT_SEARCH_CAPACITY: usize = 10;

pub struct RecentSearches {
    store: Arc<dyn KeyValueStore>,
    locks: KeyedLocks,
}

impl RecentSearches {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            locks: KeyedLocks::new(),
        }
    }

    async fn read(&self) -> Vec<String> {
        codec::read_or_default(self.store.as_ref(), keys::RECENT_SEARCHES).await
    }

    async fn write(&self, list: &[String]) -> Result<()> {
        let raw = codec::encode(&list)?;
        self.store.set(keys::RECENT_SEARCHES, &raw).await?;
        Ok(())
    }

    /// Record a search term at the front of the list
    ///
    /// The term is trimmed; an empty result is a no-op. An existing
    /// case-insensitive match is removed first, so the newest casing wins,
    /// then the list is truncated to [`RECENT_SEARCH_CAPACITY`].
    pub async fn record(&self, term: &str) -> Result<()> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(());
        }

        let _guard = self.locks.acquire(keys::RECENT_SEARCHES).await;
        let mut list = self.read().await;

        let needle = term.to_lowercase();
        list.retain(|t| t.to_lowercase() != needle);
        list.insert(0, term.to_string());
        list.truncate(RECENT_SEARCH_CAPACITY);

        self.write(&list).await?;
        debug!(term = term, "Recorded search");
        Ok(())
    }

    /// Search terms, most-recent-first
    pub async fn list(&self) -> Result<Vec<String>> {
        Ok(self.read().await)
    }

    /// Remove a term by case-insensitive exact match; no-op if absent
    pub async fn remove(&self, term: &str) -> Result<()> {
        let _guard = self.locks.acquire(keys::RECENT_SEARCHES).await;
        let mut list = self.read().await;
        let needle = term.to_lowercase();
        list.retain(|t| t.to_lowercase() != needle);
        self.write(&list).await
    }

    /// Remove every term
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.locks.acquire(keys::RECENT_SEARCHES).await;
        self.write(&[]).await
    }
}
