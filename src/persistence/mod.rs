//! Key/value persistence
//!
//! The leaderboard and settings are small JSON blobs stored under fixed
//! keys. On the web that is LocalStorage; natively (and in tests) an
//! in-memory map stands in.

use std::collections::HashMap;
use std::fmt;

#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// Failure at the storage seam
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No backing store (no window, storage disabled, private mode)
    Unavailable,
    /// The backend rejected a read or write (e.g. quota exceeded)
    Backend { key: String, reason: String },
    /// Value could not be (de)serialized
    Encoding { key: String, reason: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Backend { key, reason } => write!(f, "storage error for {key:?}: {reason}"),
            Self::Encoding { key, reason } => write!(f, "cannot encode {key:?}: {reason}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// String key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value; `Ok(None)` when the key is absent
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| StorageError::Encoding {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

/// Encode a value as JSON and write it
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: serde::Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|e| StorageError::Encoding {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &json)
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
