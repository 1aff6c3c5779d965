//! Persisted storage key layout
//!
//! One key per collection, all JSON-encoded except the last-used pointer,
//! which is a plain string:
//!
//! | Key | Value |
//! |---|---|
//! | `playlists:index` | object: playlist name → array of tracks |
//! | `playlists:lastUsed` | plain playlist name, absent = none |
//! | `favorites:list` | array of tracks |
//! | `history:list` | array of tracks, bounded |
//! | `search:recent` | array of strings, bounded |
//!
//! Absence of a key is always equivalent to the empty value.

/// All playlists, one blob mapping name to its ordered track list
pub const PLAYLISTS_INDEX: &str = "playlists:index";

/// Name of the most recently used playlist
pub const PLAYLISTS_LAST_USED: &str = "playlists:lastUsed";

/// Favorited tracks, most-recently-added first
pub const FAVORITES_LIST: &str = "favorites:list";

/// Play history, most-recent-first
pub const HISTORY_LIST: &str = "history:list";

/// Recent search terms, most-recent-first
pub const RECENT_SEARCHES: &str = "search:recent";
