//! Key/value preference persistence with browser local storage semantics.
/// File-backed store
mod file;
/// In-memory store
mod memory;

use std::path::PathBuf;

pub use file::FileStore;
pub use memory::MemoryStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why a preference could not be read or written.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed for {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Failed to (de)serialize preference '{key}': {source}")]
    Serialization { key: String, source: serde_json::Error },

    #[error("Storage quota exceeded while writing '{key}' (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: usize },
}

/// String key/value store with the local storage contract.
pub trait PreferenceStore {
    /// # Errors
    /// Returns error if the backing storage cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    /// Returns error if the value cannot be persisted.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    /// Returns error if the backing storage cannot be updated.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Failure-tolerant helpers: errors are logged and reported as "not persisted".
pub trait PreferenceStoreExt: PreferenceStore {
    /// Raw string value, `None` if absent or unreadable.
    fn load_string(&self, key: &str) -> Option<String> {
        match self.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Error retrieving {key} from storage: {e}");
                None
            }
        }
    }

    /// Returns true if the value was persisted.
    fn save_string(&mut self, key: &str, value: &str) -> bool {
        match self.set_item(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error saving {key} to storage: {e}");
                false
            }
        }
    }

    /// JSON value, `None` if absent, unreadable or not valid for `T`.
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.load_string(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(source) => {
                let e = StorageError::Serialization { key: key.to_string(), source };
                tracing::error!("Error retrieving {key} from storage: {e}");
                None
            }
        }
    }

    /// Returns true if the value was serialized and persisted.
    fn save_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(raw) => self.save_string(key, &raw),
            Err(source) => {
                let e = StorageError::Serialization { key: key.to_string(), source };
                tracing::error!("Error saving {key} to storage: {e}");
                false
            }
        }
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStoreExt for S {}
