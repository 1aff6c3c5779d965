//! Domain models for the persisted collections
//!
//! Plain serde models matching the persisted JSON payloads, plus the
//! read-time sort projection applied to track lists before display.

use serde::{Deserialize, Serialize};

/// A single playable item
///
/// Immutable value once stored; identity is `id`. Field names match the
/// persisted JSON payload (`{"id","title","artist","url","cover"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub url: String,
    pub cover: String,
}

/// A named, ordered collection of tracks
///
/// `name` is unique and case-sensitive and acts as the primary key. Within
/// one playlist no two tracks share an id; the most recent add wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    /// Validate the playlist
    ///
    /// # Returns
    /// - `Ok(())` if valid
    /// - `Err(message)` describing the first validation failure
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Playlist name cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Read-time sort projection for track lists
///
/// Sorting is applied when building a view or playback queue; the persisted
/// order is always insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Insertion order ("added"), the persisted order
    Added,
    /// Title ascending, case-insensitive
    Title,
    /// Title descending, case-insensitive
    TitleDesc,
    /// Artist ascending, case-insensitive
    Artist,
}

/// Project `tracks` into the order described by `key`
///
/// Stable sort, so equal keys keep their insertion order.
pub fn sort_tracks(tracks: &[Track], key: SortKey) -> Vec<Track> {
    let mut sorted = tracks.to_vec();
    match key {
        SortKey::Added => {}
        SortKey::Title => sorted.sort_by_key(|t| t.title.to_lowercase()),
        SortKey::TitleDesc => {
            sorted.sort_by_key(|t| t.title.to_lowercase());
            sorted.reverse();
        }
        SortKey::Artist => sorted.sort_by_key(|t| t.artist.to_lowercase()),
    }
    sorted
}
