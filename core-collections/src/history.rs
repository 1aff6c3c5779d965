//! Play history store
//!
//! Most-recent-first record of played tracks, bounded to
//! [`HISTORY_CAPACITY`] entries and unique by track id, persisted under
//! [`keys::HISTORY_LIST`].

use std::sync::Arc;

use bridge_traits::storage::KeyValueStore;
use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::keys;
use crate::models::Track;
use crate::sync::KeyedLocks;

/// Maximum number of retained history entries
pub const HISTORY_CAPACITY: usize = 50;

pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    locks: KeyedLocks,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            locks: KeyedLocks::new(),
        }
    }

    async fn read(&self) -> Vec<Track> {
        codec::read_or_default(self.store.as_ref(), keys::HISTORY_LIST).await
    }

    async fn write(&self, list: &[Track]) -> Result<()> {
        let raw = codec::encode(&list)?;
        self.store.set(keys::HISTORY_LIST, &raw).await?;
        Ok(())
    }

    /// Record a play at the front of the history
    ///
    /// An earlier entry with the same id is moved rather than duplicated,
    /// and the list is truncated to [`HISTORY_CAPACITY`]. Call this on
    /// track-change events, not on playback ticks.
    pub async fn record_play(&self, track: Track) -> Result<()> {
        let _guard = self.locks.acquire(keys::HISTORY_LIST).await;
        let mut list = self.read().await;

        list.retain(|t| t.id != track.id);
        debug!(track_id = %track.id, "Recorded play");
        list.insert(0, track);
        list.truncate(HISTORY_CAPACITY);

        self.write(&list).await
    }

    /// Played tracks, most-recent-first
    pub async fn list(&self) -> Result<Vec<Track>> {
        Ok(self.read().await)
    }

    /// Remove a history entry by id; no-op if absent
    pub async fn remove(&self, id: &str) -> Result<()> {
        let _guard = self.locks.acquire(keys::HISTORY_LIST).await;
        let mut list = self.read().await;
        list.retain(|t| t.id != id);
        self.write(&list).await
    }

    /// Remove every history entry
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.locks.acquire(keys::HISTORY_LIST).await;
        self.write(&[]).await
    }
}
