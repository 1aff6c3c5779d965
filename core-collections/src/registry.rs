//! Playlist registry
//!
//! Owns the set of named playlists and the "last used" pointer. The whole
//! registry persists as one blob under [`keys::PLAYLISTS_INDEX`], a
//! `BTreeMap` from playlist name to ordered track list, so `list_names()`
//! is lexicographic by construction.
//!
//! The index and the last-used pointer live under separate keys and there
//! are no multi-key transactions; a crash between the two writes can leave
//! the pointer one step behind the index. Reads tolerate this (a stale
//! pointer is at worst ignored by callers that re-resolve names).

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use bridge_traits::storage::KeyValueStore;
use tracing::debug;

use crate::codec;
use crate::error::{CollectionsError, Result};
use crate::keys;
use crate::models::{sort_tracks, Playlist, SortKey, Track};
use crate::sync::KeyedLocks;

type PlaylistMap = BTreeMap<String, Vec<Track>>;

/// Registry of named playlists backed by a key-value store
///
/// Stateless service object: every read goes to the store, every mutation
/// is a serialized read-modify-write on the index key.
pub struct PlaylistRegistry {
    store: Arc<dyn KeyValueStore>,
    locks: KeyedLocks,
}

impl PlaylistRegistry {
    /// Create a new registry over the given store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            locks: KeyedLocks::new(),
        }
    }

    async fn read_index(&self) -> PlaylistMap {
        codec::read_or_default(self.store.as_ref(), keys::PLAYLISTS_INDEX).await
    }

    async fn write_index(&self, map: &PlaylistMap) -> Result<()> {
        let raw = codec::encode(map)?;
        self.store.set(keys::PLAYLISTS_INDEX, &raw).await?;
        debug!(playlists = map.len(), "Persisted playlist index");
        Ok(())
    }

    fn validate_name(name: &str, field: &str) -> Result<()> {
        Playlist::new(name)
            .validate()
            .map_err(|e| CollectionsError::InvalidInput {
                field: field.to_string(),
                message: e,
            })
    }

    /// All playlist names, lexicographic order
    pub async fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.read_index().await.into_keys().collect())
    }

    /// Full snapshot of every playlist, in name order
    ///
    /// Callers re-read the snapshot after every mutation instead of
    /// patching an in-memory view.
    pub async fn playlists(&self) -> Result<Vec<Playlist>> {
        let map = self.read_index().await;
        Ok(map
            .into_iter()
            .map(|(name, tracks)| Playlist { name, tracks })
            .collect())
    }

    /// Create an empty playlist
    ///
    /// No-op if `name` already exists. Rejects empty/whitespace-only names.
    pub async fn create(&self, name: &str) -> Result<()> {
        Self::validate_name(name, "name")?;

        let _guard = self.locks.acquire(keys::PLAYLISTS_INDEX).await;
        let mut map = self.read_index().await;
        if map.contains_key(name) {
            return Ok(());
        }
        map.insert(name.to_string(), Vec::new());
        self.write_index(&map).await?;
        debug!(name = name, "Created playlist");
        Ok(())
    }

    /// Rename a playlist, merging into the target on name collision
    ///
    /// No-op if `old_name` is absent, `new_name` equals `old_name`, or
    /// `new_name` is blank. When `new_name` already exists, its own tracks
    /// keep their place and `old_name`'s tracks are appended, deduplicated
    /// by id with the first occurrence winning. A last-used pointer at
    /// `old_name` follows the rename.
    pub async fn rename(&self, old_name: &str, new_name: &str) -> Result<()> {
        if new_name.trim().is_empty() || new_name == old_name {
            return Ok(());
        }

        {
            let _guard = self.locks.acquire(keys::PLAYLISTS_INDEX).await;
            let mut map = self.read_index().await;
            let Some(moved) = map.remove(old_name) else {
                return Ok(());
            };
            let merged = match map.remove(new_name) {
                Some(existing) => dedup_by_id(existing.into_iter().chain(moved)),
                None => moved,
            };
            map.insert(new_name.to_string(), merged);
            self.write_index(&map).await?;
        }

        if self.get_last_used().await?.as_deref() == Some(old_name) {
            self.set_last_used(new_name).await?;
        }
        debug!(from = old_name, to = new_name, "Renamed playlist");
        Ok(())
    }

    /// Delete a playlist and its tracks
    ///
    /// If the last-used pointer was at `name`, it moves to the first
    /// surviving name in `list_names()` order, or is cleared when no
    /// playlist remains.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let survivor = {
            let _guard = self.locks.acquire(keys::PLAYLISTS_INDEX).await;
            let mut map = self.read_index().await;
            if map.remove(name).is_none() {
                return Ok(());
            }
            self.write_index(&map).await?;
            map.into_keys().next()
        };

        if self.get_last_used().await?.as_deref() == Some(name) {
            match survivor {
                Some(next) => self.set_last_used(&next).await?,
                None => self.store.remove(keys::PLAYLISTS_LAST_USED).await?,
            }
        }
        debug!(name = name, "Deleted playlist");
        Ok(())
    }

    /// Tracks of a playlist in insertion order; empty for unknown names
    pub async fn get_tracks(&self, name: &str) -> Result<Vec<Track>> {
        let map = self.read_index().await;
        Ok(map.get(name).cloned().unwrap_or_default())
    }

    /// Tracks of a playlist projected through a sort key
    pub async fn get_tracks_sorted(&self, name: &str, key: SortKey) -> Result<Vec<Track>> {
        let tracks = self.get_tracks(name).await?;
        Ok(sort_tracks(&tracks, key))
    }

    /// Overwrite a playlist's track list, creating the playlist if missing
    pub async fn set_tracks(&self, name: &str, tracks: Vec<Track>) -> Result<()> {
        Self::validate_name(name, "name")?;

        let _guard = self.locks.acquire(keys::PLAYLISTS_INDEX).await;
        let mut map = self.read_index().await;
        map.insert(name.to_string(), tracks);
        self.write_index(&map).await
    }

    /// Add a track to a playlist, creating the playlist if missing
    ///
    /// Deduplicates by id: an existing track with the same id is removed
    /// first, so the new copy always lands at the tail.
    pub async fn add_track(&self, name: &str, track: Track) -> Result<()> {
        Self::validate_name(name, "name")?;

        let track_id = track.id.clone();
        let _guard = self.locks.acquire(keys::PLAYLISTS_INDEX).await;
        let mut map = self.read_index().await;
        let list = map.entry(name.to_string()).or_default();
        list.retain(|t| t.id != track.id);
        list.push(track);
        self.write_index(&map).await?;
        debug!(name = name, track_id = %track_id, "Added track to playlist");
        Ok(())
    }

    /// Remove the track with the given id; no-op if track or playlist is absent
    pub async fn remove_track(&self, name: &str, id: &str) -> Result<()> {
        let _guard = self.locks.acquire(keys::PLAYLISTS_INDEX).await;
        let mut map = self.read_index().await;
        let Some(list) = map.get_mut(name) else {
            return Ok(());
        };
        let Some(pos) = list.iter().position(|t| t.id == id) else {
            return Ok(());
        };
        list.remove(pos);
        self.write_index(&map).await
    }

    /// Delete every playlist and clear the last-used pointer
    pub async fn clear_all(&self) -> Result<()> {
        let _guard = self.locks.acquire(keys::PLAYLISTS_INDEX).await;
        let raw = codec::encode(&PlaylistMap::new())?;
        self.store.set(keys::PLAYLISTS_INDEX, &raw).await?;
        self.store.remove(keys::PLAYLISTS_LAST_USED).await?;
        debug!("Cleared all playlists");
        Ok(())
    }

    /// Name of the most recently used playlist, if any
    ///
    /// A legacy empty-string value (written by older app versions after
    /// deleting the final playlist) decodes as `None`.
    pub async fn get_last_used(&self) -> Result<Option<String>> {
        match self.store.get(keys::PLAYLISTS_LAST_USED).await {
            Ok(raw) => Ok(raw.filter(|s| !s.trim().is_empty())),
            Err(err) => {
                tracing::warn!(error = %err, "Store read failed, treating last-used as unset");
                Ok(None)
            }
        }
    }

    /// Record `name` as the most recently used playlist
    ///
    /// Does not validate that `name` currently exists; callers are
    /// responsible for passing a live name.
    pub async fn set_last_used(&self, name: &str) -> Result<()> {
        self.store.set(keys::PLAYLISTS_LAST_USED, name).await?;
        Ok(())
    }
}

/// Keep the first occurrence of each track id, preserving order
fn dedup_by_id<I: IntoIterator<Item = Track>>(tracks: I) -> Vec<Track> {
    let mut seen = HashSet::new();
    tracks
        .into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::BridgeError;
    use bridge_traits::storage::MemoryKeyValueStore;
    use mockall::mock;

    fn track(id: &str, title: &str) -> Track {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            artist: "Artist".to_string(),
            url: format!("https://cdn.example.com/{}.mp3", id),
            cover: format!("https://cdn.example.com/{}.jpg", id),
        }
    }

    fn setup() -> PlaylistRegistry {
        PlaylistRegistry::new(Arc::new(MemoryKeyValueStore::new()))
    }

    #[tokio::test]
    async fn test_create_and_list_names_lexicographic() {
        let registry = setup();

        registry.create("Workout").await.unwrap();
        registry.create("Chill").await.unwrap();
        registry.create("Chill").await.unwrap(); // no-op

        assert_eq!(
            registry.list_names().await.unwrap(),
            vec!["Chill".to_string(), "Workout".to_string()]
        );
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let registry = setup();

        let result = registry.create("   ").await;
        assert!(matches!(
            result,
            Err(CollectionsError::InvalidInput { .. })
        ));
        assert!(registry.list_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_track_last_write_wins() {
        let registry = setup();

        registry.create("Chill").await.unwrap();
        registry.add_track("Chill", track("s1", "Sunrise")).await.unwrap();

        let tracks = registry.get_tracks("Chill").await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Sunrise");

        registry.add_track("Chill", track("s1", "Updated")).await.unwrap();

        let tracks = registry.get_tracks("Chill").await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Updated");

        registry.remove_track("Chill", "s1").await.unwrap();
        assert!(registry.get_tracks("Chill").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_track_moves_duplicate_to_tail() {
        let registry = setup();

        registry.add_track("Mix", track("s1", "One")).await.unwrap();
        registry.add_track("Mix", track("s2", "Two")).await.unwrap();
        registry.add_track("Mix", track("s1", "One")).await.unwrap();

        let ids: Vec<_> = registry
            .get_tracks("Mix")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["s2".to_string(), "s1".to_string()]);
    }

    #[tokio::test]
    async fn test_add_track_auto_creates_playlist() {
        let registry = setup();

        registry.add_track("Fresh", track("s1", "One")).await.unwrap();

        assert_eq!(registry.list_names().await.unwrap(), vec!["Fresh".to_string()]);
        assert_eq!(registry.get_tracks("Fresh").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_playlists_snapshot() {
        let registry = setup();

        registry.add_track("B Side", track("s1", "One")).await.unwrap();
        registry.create("Acoustic").await.unwrap();

        let playlists = registry.playlists().await.unwrap();
        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].name, "Acoustic");
        assert!(playlists[0].tracks.is_empty());
        assert_eq!(playlists[1].name, "B Side");
        assert_eq!(playlists[1].tracks.len(), 1);
    }

    #[tokio::test]
    async fn test_get_tracks_unknown_name_is_empty() {
        let registry = setup();
        assert!(registry.get_tracks("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_track_soft_noop() {
        let registry = setup();

        registry.remove_track("nope", "s1").await.unwrap();

        registry.create("Chill").await.unwrap();
        registry.remove_track("Chill", "s1").await.unwrap();
        assert!(registry.get_tracks("Chill").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rename_plain_preserves_order() {
        let registry = setup();

        registry.add_track("Old", track("s1", "One")).await.unwrap();
        registry.add_track("Old", track("s2", "Two")).await.unwrap();

        registry.rename("Old", "New").await.unwrap();

        assert_eq!(registry.list_names().await.unwrap(), vec!["New".to_string()]);
        let ids: Vec<_> = registry
            .get_tracks("New")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["s1".to_string(), "s2".to_string()]);
    }

    #[tokio::test]
    async fn test_rename_collision_merges_first_seen_wins() {
        let registry = setup();

        // A = [x, y], B = [y', z] where y and y' share an id
        registry.add_track("A", track("x", "X")).await.unwrap();
        registry.add_track("A", track("y", "A's Y")).await.unwrap();
        registry.add_track("B", track("y", "B's Y")).await.unwrap();
        registry.add_track("B", track("z", "Z")).await.unwrap();

        registry.rename("A", "B").await.unwrap();

        assert_eq!(registry.list_names().await.unwrap(), vec!["B".to_string()]);
        let tracks = registry.get_tracks("B").await.unwrap();
        let ids: Vec<_> = tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "z", "x"]);
        // B's copy of the shared id wins
        assert_eq!(tracks[0].title, "B's Y");
    }

    #[tokio::test]
    async fn test_rename_noop_cases() {
        let registry = setup();

        registry.create("Chill").await.unwrap();
        registry.rename("Chill", "Chill").await.unwrap();
        registry.rename("Chill", "  ").await.unwrap();
        registry.rename("Missing", "Other").await.unwrap();

        assert_eq!(registry.list_names().await.unwrap(), vec!["Chill".to_string()]);
    }

    #[tokio::test]
    async fn test_rename_follows_last_used() {
        let registry = setup();

        registry.create("Old").await.unwrap();
        registry.set_last_used("Old").await.unwrap();

        registry.rename("Old", "New").await.unwrap();

        assert_eq!(registry.get_last_used().await.unwrap(), Some("New".to_string()));
    }

    #[tokio::test]
    async fn test_delete_reassigns_last_used() {
        let registry = setup();

        registry.create("Beta").await.unwrap();
        registry.create("Alpha").await.unwrap();
        registry.set_last_used("Beta").await.unwrap();

        registry.delete("Beta").await.unwrap();

        // first surviving name in list order
        assert_eq!(registry.get_last_used().await.unwrap(), Some("Alpha".to_string()));
    }

    #[tokio::test]
    async fn test_delete_last_playlist_clears_pointer() {
        let registry = setup();

        registry.create("Only").await.unwrap();
        registry.set_last_used("Only").await.unwrap();

        registry.delete("Only").await.unwrap();

        assert_eq!(registry.get_last_used().await.unwrap(), None);
        assert!(registry.list_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unrelated_keeps_last_used() {
        let registry = setup();

        registry.create("Keep").await.unwrap();
        registry.create("Drop").await.unwrap();
        registry.set_last_used("Keep").await.unwrap();

        registry.delete("Drop").await.unwrap();

        assert_eq!(registry.get_last_used().await.unwrap(), Some("Keep".to_string()));
    }

    #[tokio::test]
    async fn test_clear_all() {
        let registry = setup();

        registry.add_track("Chill", track("s1", "One")).await.unwrap();
        registry.set_last_used("Chill").await.unwrap();

        registry.clear_all().await.unwrap();

        assert!(registry.list_names().await.unwrap().is_empty());
        assert_eq!(registry.get_last_used().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_tracks_overwrites() {
        let registry = setup();

        registry.add_track("Mix", track("s1", "One")).await.unwrap();
        registry
            .set_tracks("Mix", vec![track("s2", "Two"), track("s3", "Three")])
            .await
            .unwrap();

        let ids: Vec<_> = registry
            .get_tracks("Mix")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["s2".to_string(), "s3".to_string()]);
    }

    #[tokio::test]
    async fn test_get_tracks_sorted_is_projection() {
        let registry = setup();

        registry.add_track("Mix", track("s1", "Zebra")).await.unwrap();
        registry.add_track("Mix", track("s2", "alpha")).await.unwrap();

        let sorted = registry.get_tracks_sorted("Mix", SortKey::Title).await.unwrap();
        assert_eq!(sorted[0].id, "s2");

        // persisted order unchanged
        let stored = registry.get_tracks("Mix").await.unwrap();
        assert_eq!(stored[0].id, "s1");
    }

    #[tokio::test]
    async fn test_legacy_empty_last_used_is_none() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(keys::PLAYLISTS_LAST_USED, "").await.unwrap();

        let registry = PlaylistRegistry::new(store);
        assert_eq!(registry.get_last_used().await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_adds_keep_all_tracks() {
        let registry = Arc::new(setup());

        let mut handles = Vec::new();
        for i in 0..10 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry
                    .add_track("Storm", track(&format!("s{}", i), "Song"))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.get_tracks("Storm").await.unwrap().len(), 10);
    }

    mock! {
        Store {}

        #[async_trait::async_trait]
        impl KeyValueStore for Store {
            async fn get(&self, key: &str) -> bridge_traits::Result<Option<String>>;
            async fn set(&self, key: &str, value: &str) -> bridge_traits::Result<()>;
            async fn remove(&self, key: &str) -> bridge_traits::Result<()>;
            async fn clear_all(&self) -> bridge_traits::Result<()>;
            async fn list_keys(&self) -> bridge_traits::Result<Vec<String>>;
        }
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let mut store = MockStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .returning(|_, _| Err(BridgeError::OperationFailed("quota exceeded".to_string())));

        let registry = PlaylistRegistry::new(Arc::new(store));
        let result = registry.create("Chill").await;
        assert!(matches!(result, Err(CollectionsError::Bridge(_))));
    }

    #[tokio::test]
    async fn test_read_failure_degrades_to_empty() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .returning(|_| Err(BridgeError::OperationFailed("disk error".to_string())));

        let registry = PlaylistRegistry::new(Arc::new(store));
        assert!(registry.list_names().await.unwrap().is_empty());
        assert!(registry.get_tracks("Chill").await.unwrap().is_empty());
        assert_eq!(registry.get_last_used().await.unwrap(), None);
    }
}
