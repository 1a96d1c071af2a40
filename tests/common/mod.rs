//! Shared test utilities for options page tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use longclick_options::store::shared;
use longclick_options::{FileStore, OptionsConfig, OptionsPage, SettingStore, SettingsBinder};
use tempfile::TempDir;

/// A page load against an on-disk store
pub struct LoadedPage {
    pub options: OptionsPage,
    pub store: Rc<RefCell<FileStore>>,
    pub binder: SettingsBinder,
}

/// Temporary directory holding a config and a store file
pub struct OptionsEnv {
    pub dir: TempDir,
    pub config: OptionsConfig,
}

impl OptionsEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = OptionsConfig::default();
        config.store.path = Some(dir.path().join("storage.json"));
        Self { dir, config }
    }

    pub fn store_path(&self) -> PathBuf {
        self.config.store.resolved_path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Write raw (JSON-encoded) values straight into the store file
    pub fn seed(&self, items: &[(&str, &str)]) {
        let mut store = FileStore::open(self.store_path()).expect("Failed to open store");
        for (key, value) in items {
            store.set_item(key, value).expect("Failed to seed store");
        }
    }

    /// Simulate opening the options page
    pub fn load(&self) -> LoadedPage {
        let store = shared(FileStore::open(self.store_path()).expect("Failed to open store"));
        let options = OptionsPage::new(&self.config);
        let binder = SettingsBinder::bind(&options.page, store.clone(), &self.config)
            .expect("Failed to bind options page");
        LoadedPage {
            options,
            store,
            binder,
        }
    }

    /// Raw value currently on disk for `key`
    pub fn stored(&self, key: &str) -> Option<String> {
        stored_at(&self.store_path(), key)
    }
}

pub fn stored_at(path: &Path, key: &str) -> Option<String> {
    FileStore::open(path)
        .expect("Failed to open store")
        .get_item(key)
        .expect("Failed to read store")
}
