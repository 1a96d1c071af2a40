//! JSON-file-backed store
//!
//! The file holds one JSON object mapping keys to their raw values:
//!
//! ```json
//! { "holdTime": "\"1500\"", "longClickToggle": "true" }
//! ```
//!
//! Every write is flushed to disk before `set_item` returns.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use super::{SettingStore, StoreError};
use crate::atomic;

/// Store persisted as a JSON object file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing or blank file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let items = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                StoreError::Malformed {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No store at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Self { path, items })
    }

    pub fn items(&self) -> &BTreeMap<String, String> {
        &self.items
    }

    fn flush(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.items)?;
        atomic::write_locked(&self.path, content.as_bytes()).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("Flushed {} item(s) to {}", self.items.len(), self.path.display());
        Ok(())
    }
}

impl SettingStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("storage.json")).unwrap();
        assert!(store.items().is_empty());
        assert_eq!(store.get_item("holdTime").unwrap(), None);
    }

    #[test]
    fn test_writes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set_item("holdTime", "\"2000\"").unwrap();
        store.set_item("longClickToggle", "false").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("holdTime").unwrap().as_deref(),
            Some("\"2000\"")
        );
        assert_eq!(
            reopened.get_item("longClickToggle").unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_remove_item_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set_item("holdTime", "\"2000\"").unwrap();
        store.remove_item("holdTime").unwrap();
        store.remove_item("never-set").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert!(reopened.items().is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
        assert!(err.to_string().contains("storage.json"));
    }

    #[test]
    fn test_last_flush_replaces_whole_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut first = FileStore::open(&path).unwrap();
        let mut second = FileStore::open(&path).unwrap();
        first.set_item("longClickToggle", "false").unwrap();
        second.set_item("holdTime", "\"2000\"").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_item("longClickToggle").unwrap(), None);
        assert_eq!(
            reopened.get_item("holdTime").unwrap().as_deref(),
            Some("\"2000\"")
        );
    }

    #[test]
    fn test_blank_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "  \n").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.items().is_empty());
    }
}
