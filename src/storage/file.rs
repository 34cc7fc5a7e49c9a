use std::collections::BTreeMap;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use tempfile::NamedTempFile;

use super::{
    PreferenceStore,
    StorageError,
};

/// File name used by [`FileStore::in_dir`].
const FILE_NAME: &str = "preferences.json";

/// Store persisted as a single JSON object file.
///
/// Every operation reads the file afresh, so several stores on the same path
/// see each other's writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/preferences.json`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(FILE_NAME))
    }

    /// Location of the JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole map; a missing file is an empty map.
    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|source| StorageError::Io { path: self.path.clone(), source })?;
        serde_json::from_str(&content).map_err(|source| StorageError::Serialization {
            key: self.path.display().to_string(),
            source,
        })
    }

    /// Read the map for a write. A corrupt file is moved aside and replaced by
    /// an empty map so one bad write does not block every later one.
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_all() {
            Err(StorageError::Serialization { source, .. }) => {
                let aside = self.path.with_extension("json.corrupt");
                tracing::warn!(
                    "Preference file {:?} is corrupt ({source}); moving it to {:?}",
                    self.path,
                    aside
                );
                std::fs::rename(&self.path, &aside)
                    .map_err(|source| StorageError::Io { path: self.path.clone(), source })?;
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    /// Write through a temporary file in the same directory, then rename it
    /// over the target.
    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(items).map_err(|source| {
            StorageError::Serialization { key: self.path.display().to_string(), source }
        })?;
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)
            .map_err(|source| StorageError::Io { path: parent.clone(), source })?;

        let mut temp = NamedTempFile::new_in(&parent)
            .map_err(|source| StorageError::Io { path: parent.clone(), source })?;
        temp.write_all(content.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|source| StorageError::Io { path: temp.path().to_path_buf(), source })?;
        temp.persist(&self.path)
            .map_err(|err| StorageError::Io { path: self.path.clone(), source: err.error })?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read_for_update()?;
        items.insert(key.to_string(), value.to_string());
        tracing::debug!("Persisting preference '{key}' to {:?}", self.path);
        self.write_all(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut items = self.read_for_update()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}
