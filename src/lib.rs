//! longclick-options - settings binder for the long-click options page
//!
//! The options page has two controls: a checkbox enabling long clicks and a
//! text field holding the hold time in milliseconds. [`SettingsBinder`] keeps
//! both in sync with a [`SettingStore`]:
//!
//! 1. **Initial pull**: each stored value (or its default) is rendered into
//!    its control and re-persisted if valid.
//! 2. **Edits**: every user change flows through the same side effects, in
//!    order, synchronously inside the event handler.
//!
//! The hold time field is disabled while long clicks are off, and is marked
//! `aria-invalid` whenever its text is not an integer of at least 1000.
//! Invalid text is never persisted.

mod atomic;
pub mod binder;
pub mod config;
pub mod page;
pub mod store;
pub mod stream;

pub use binder::{BindError, SettingsBinder};
pub use config::OptionsConfig;
pub use page::{Control, Element, OptionsPage, Page};
pub use store::{FileStore, MemoryStore, SettingStore, SharedStore, StoreError};
