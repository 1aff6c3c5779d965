//! # Desktop Bridge Implementations
//!
//! Desktop adapters for the `bridge-traits` contracts.
//!
//! Currently provides [`SqliteKeyValueStore`](kv::SqliteKeyValueStore), a
//! SQLite-backed implementation of
//! [`KeyValueStore`](bridge_traits::storage::KeyValueStore).

pub mod kv;

pub use kv::SqliteKeyValueStore;
