//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the collection-management core and
//! platform-specific persistence. Each supported platform ships a concrete
//! adapter for the [`KeyValueStore`](storage::KeyValueStore) trait:
//!
//! | Platform | Backing store | Implementation crate |
//! |----------|---------------------------------|----------------------|
//! | Desktop  | SQLite file                     | `bridge-desktop`     |
//! | iOS      | UserDefaults                    | host app             |
//! | Android  | SharedPreferences / DataStore   | host app             |
//! | Tests    | In-process map                  | this crate           |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Platform implementations should convert their native errors to
//! `BridgeError` and provide actionable messages (key names, file paths).
//!
//! ## Thread Safety
//!
//! Bridge traits require `Send + Sync` bounds so stores can be shared across
//! async tasks behind an `Arc`.

pub mod error;
pub mod storage;

pub use error::{BridgeError, Result};
pub use storage::{KeyValueStore, MemoryKeyValueStore};
