use std::collections::BTreeMap;

use super::{
    PreferenceStore,
    StorageError,
};

/// In-memory store, optionally with a byte quota like browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
    /// Maximum total bytes of keys and values.
    quota: Option<usize>,
}

impl MemoryStore {
    /// Store without a size limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding at most `limit` bytes of keys and values.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self { items: BTreeMap::new(), quota: Some(limit) }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bytes in use, not counting the entry under `key`.
    fn used_bytes_without(&self, key: &str) -> usize {
        self.items.iter().filter(|(k, _)| k.as_str() != key).map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl PreferenceStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota
            && self.used_bytes_without(key) + key.len() + value.len() > limit
        {
            return Err(StorageError::QuotaExceeded { key: key.to_string(), limit });
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}
