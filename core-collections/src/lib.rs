//! # Collection Management Module
//!
//! Owns the durable user collections of the player — named playlists,
//! favorites, play history, and recent searches — persisted through an
//! injected [`KeyValueStore`](bridge_traits::storage::KeyValueStore).
//!
//! ## Overview
//!
//! This module manages:
//! - Named playlists with rename/merge semantics and a "last used" pointer
//! - Favorites (toggle, most-recently-added first)
//! - Play history (bounded, most-recent-first)
//! - Recent searches (bounded, case-insensitive dedup)
//!
//! All stores are explicit service objects parameterized by the injected
//! store; there are no module-level caches. Every read goes to the store and
//! every mutation is a serialized read-modify-write on the affected key.

pub mod codec;
pub mod error;
pub mod favorites;
pub mod history;
pub mod keys;
pub mod models;
pub mod registry;
pub mod searches;

mod sync;

pub use error::{CollectionsError, Result};
pub use favorites::FavoritesStore;
pub use history::{HistoryStore, HISTORY_CAPACITY};
pub use models::{sort_tracks, Playlist, SortKey, Track};
pub use registry::PlaylistRegistry;
pub use searches::{RecentSearches, RECENT_SEARCH_CAPACITY};
