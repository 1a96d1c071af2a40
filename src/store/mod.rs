//! Settings storage
//!
//! A [`SettingStore`] is a string-keyed, string-valued store in the manner of
//! a page's local storage. Values are JSON text; decoding them is the
//! binder's job.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Error type for store access
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access store file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed store file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Store is unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous key-value capability
pub trait SettingStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Store handle shared between the binder's subscriptions
pub type SharedStore = Rc<RefCell<dyn SettingStore>>;

/// Wrap a store for sharing, keeping the concrete type for the caller.
///
/// The returned handle coerces to [`SharedStore`].
pub fn shared<S: SettingStore + 'static>(store: S) -> Rc<RefCell<S>> {
    Rc::new(RefCell::new(store))
}
