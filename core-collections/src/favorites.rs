//! Favorites store
//!
//! Set-like collection of favorited tracks with toggle semantics, persisted
//! under [`keys::FAVORITES_LIST`]. Order is most-recently-added first,
//! unique by track id.

use std::sync::Arc;

use bridge_traits::storage::KeyValueStore;
use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::keys;
use crate::models::Track;
use crate::sync::KeyedLocks;

pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore>,
    locks: KeyedLocks,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            locks: KeyedLocks::new(),
        }
    }

    async fn read(&self) -> Vec<Track> {
        codec::read_or_default(self.store.as_ref(), keys::FAVORITES_LIST).await
    }

    async fn write(&self, list: &[Track]) -> Result<()> {
        let raw = codec::encode(&list)?;
        self.store.set(keys::FAVORITES_LIST, &raw).await?;
        Ok(())
    }

    /// Favorited tracks, most-recently-added first
    pub async fn list(&self) -> Result<Vec<Track>> {
        Ok(self.read().await)
    }

    /// Toggle a track's favorite state
    ///
    /// Returns `true` if the track is now favorited (added to the front),
    /// `false` if it was removed. Membership is by id only.
    pub async fn toggle(&self, track: Track) -> Result<bool> {
        let _guard = self.locks.acquire(keys::FAVORITES_LIST).await;
        let mut list = self.read().await;

        let added = match list.iter().position(|t| t.id == track.id) {
            Some(pos) => {
                list.remove(pos);
                false
            }
            None => {
                list.insert(0, track);
                true
            }
        };

        self.write(&list).await?;
        debug!(added = added, favorites = list.len(), "Toggled favorite");
        Ok(added)
    }

    /// Remove a favorite by id; no-op if absent
    pub async fn remove(&self, id: &str) -> Result<()> {
        let _guard = self.locks.acquire(keys::FAVORITES_LIST).await;
        let mut list = self.read().await;
        list.retain(|t| t.id != id);
        self.write(&list).await
    }

    /// Remove every favorite
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.locks.acquire(keys::FAVORITES_LIST).await;
        self.write(&[]).await
    }
}
