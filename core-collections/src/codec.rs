//! Collection codec
//!
//! Converts between store values (strings, possibly absent or corrupt) and
//! typed collections. Decoding never fails: absent or malformed input yields
//! the type's empty value so a damaged blob degrades to an empty view
//! instead of a hard failure.

use bridge_traits::storage::KeyValueStore;
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::{CollectionsError, Result};

/// Decode a raw store value, substituting the empty value on absence or
/// malformed input
pub fn decode_or_default<T>(key: &str, raw: Option<String>) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = raw else {
        return T::default();
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(key = key, error = %err, "Discarding unreadable stored value");
            T::default()
        }
    }
}

/// Encode a collection for storage
///
/// Total for any value this subsystem constructs; a serializer failure is
/// surfaced as [`CollectionsError::Codec`].
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| CollectionsError::Codec(e.to_string()))
}

/// Read and decode `key` from the store
///
/// Storage read failures are recovered locally: the empty value is
/// substituted and a warning logged, so reads never propagate errors to the
/// caller.
pub(crate) async fn read_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await {
        Ok(raw) => decode_or_default(key, raw),
        Err(err) => {
            warn!(key = key, error = %err, "Store read failed, substituting empty value");
            T::default()
        }
    }
}
