//! Settings binder
//!
//! Connects the two long-click settings to their controls and to the store.
//! For each setting the binder pulls the initial value from the store,
//! renders it into the control, then treats the initial value followed by
//! every user edit as one [`Changes`] sequence and subscribes side effects to
//! it:
//!
//! - toggle: enable/disable the hold time field, then persist the toggle
//!   (including the initial value, which is simply re-written)
//! - hold time: persist only valid values, and mark every value valid or
//!   invalid through [`INVALID_ATTRIBUTE`]
//!
//! Side effects write to controls programmatically, which never dispatches
//! events, so feeding a control its own value cannot loop.

pub mod codec;
pub mod validate;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error, info};

use crate::config::{HoldTimeSettings, OptionsConfig, ToggleSettings};
use crate::page::{Control, ControlKind, EventKind, INVALID_ATTRIBUTE, Page};
use crate::store::{SharedStore, StoreError};
use crate::stream::{Changes, Held, Subscription, hold};

pub use validate::{is_hold_time_valid, parse_int_prefix};

/// Error type for binding a page to the store
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("No control with id '{0}' on the page")]
    MissingControl(String),

    #[error("Control '{id}' is a {found}, expected a {expected}")]
    WrongControlKind {
        id: String,
        expected: ControlKind,
        found: ControlKind,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Malformed stored value for '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// First failed store write not yet taken, shared with the write subscriptions
type WriteFailure = Rc<RefCell<Option<StoreError>>>;

/// Live binding between the options page and the store
///
/// Bindings stay attached to the page's controls until [`SettingsBinder::unbind`];
/// dropping the binder only drops the read handles.
pub struct SettingsBinder {
    toggle: Held<bool>,
    hold_time: Held<String>,
    min_hold_time: i64,
    write_failure: WriteFailure,
    subscriptions: Vec<Subscription>,
}

impl SettingsBinder {
    /// Bind the toggle and hold time controls on `page` to `store`.
    ///
    /// Both controls are looked up and both stored values decoded before any
    /// side effect runs, so a missing control or a malformed value leaves the
    /// page and the store untouched.
    ///
    /// A failed initial write stops binding at that setting and is returned
    /// as [`BindError::Store`]. Everything subscribed so far is detached, so
    /// later user edits write nothing. Controls keep whatever the settings
    /// bound before the failure rendered into them, and the store keeps the
    /// writes that succeeded (the toggle, when the hold time write fails).
    pub fn bind(
        page: &Page,
        store: SharedStore,
        config: &OptionsConfig,
    ) -> Result<Self, BindError> {
        let checkbox = lookup(page, &config.toggle.element_id, ControlKind::Checkbox)?;
        let field = lookup(page, &config.hold_time.element_id, ControlKind::Text)?;

        let initial_toggle = read_initial(
            &store,
            &config.toggle.key,
            codec::encode_toggle(config.toggle.default),
            codec::decode_toggle,
        )?;
        let initial_hold_time = read_initial(
            &store,
            &config.hold_time.key,
            codec::encode_hold_time(&config.hold_time.default),
            codec::decode_hold_time,
        )?;

        let write_failure = WriteFailure::default();
        let mut subscriptions = Vec::new();

        let toggle = bind_toggle(
            &checkbox,
            &field,
            &store,
            &config.toggle,
            initial_toggle,
            &write_failure,
            &mut subscriptions,
        );
        abort_on_write_failure(&write_failure, &mut subscriptions)?;

        let hold_time = bind_hold_time(
            &field,
            &store,
            &config.hold_time,
            initial_hold_time,
            &write_failure,
            &mut subscriptions,
        );
        abort_on_write_failure(&write_failure, &mut subscriptions)?;

        info!(
            "Bound long-click settings (enabled: {}, hold time: {:?})",
            toggle.get(),
            hold_time.get()
        );

        Ok(Self {
            toggle,
            hold_time,
            min_hold_time: config.hold_time.min,
            write_failure,
            subscriptions,
        })
    }

    /// Detach every binding from the page. Controls keep their current state.
    pub fn unbind(self) {
        info!("Unbinding long-click settings");
        Subscription::all(self.subscriptions).unsubscribe();
    }

    /// Current toggle value
    pub fn long_click_enabled(&self) -> bool {
        self.toggle.get()
    }

    /// Current hold time text, valid or not
    pub fn hold_time(&self) -> String {
        self.hold_time.get()
    }

    pub fn hold_time_valid(&self) -> bool {
        is_hold_time_valid(&self.hold_time.get(), self.min_hold_time)
    }

    /// Take the first store write failure since the last call, if any.
    ///
    /// Writes happen inside event handlers, where there is no caller to
    /// return an error to. Later failures are only logged until this is
    /// called.
    pub fn take_write_error(&self) -> Option<StoreError> {
        self.write_failure.borrow_mut().take()
    }
}

fn abort_on_write_failure(
    write_failure: &WriteFailure,
    subscriptions: &mut Vec<Subscription>,
) -> Result<(), BindError> {
    let Some(err) = write_failure.borrow_mut().take() else {
        return Ok(());
    };
    Subscription::all(subscriptions.drain(..)).unsubscribe();
    Err(BindError::Store(err))
}

fn lookup(page: &Page, id: &str, expected: ControlKind) -> Result<Rc<dyn Control>, BindError> {
    let control = page
        .get(id)
        .ok_or_else(|| BindError::MissingControl(id.to_string()))?;
    if control.kind() != expected {
        return Err(BindError::WrongControlKind {
            id: id.to_string(),
            expected,
            found: control.kind(),
        });
    }
    Ok(control)
}

fn read_initial<T>(
    store: &SharedStore,
    key: &str,
    default: String,
    decode: fn(&str) -> Result<T, serde_json::Error>,
) -> Result<T, BindError> {
    let stored = store.borrow().get_item(key)?;
    let text = codec::stored_or_default(stored, default);
    decode(&text).map_err(|source| BindError::Decode {
        key: key.to_string(),
        source,
    })
}

fn bind_toggle(
    checkbox: &Rc<dyn Control>,
    field: &Rc<dyn Control>,
    store: &SharedStore,
    settings: &ToggleSettings,
    initial: bool,
    write_failure: &WriteFailure,
    subscriptions: &mut Vec<Subscription>,
) -> Held<bool> {
    checkbox.set_checked(initial);

    let edits = checkbox
        .observe(EventKind::Change)
        .map(|event| event.checked);
    let changes = Changes::new(initial, edits);

    let field = Rc::clone(field);
    subscriptions.push(changes.subscribe(move |enabled| {
        debug!("Hold time field {}", if *enabled { "enabled" } else { "disabled" });
        field.set_disabled(!enabled);
    }));

    let writer = StoreWriter::new(store, &settings.key, write_failure);
    subscriptions
        .push(changes.subscribe(move |enabled| writer.write(&codec::encode_toggle(*enabled))));

    let (held, subscription) = hold(&changes, initial);
    subscriptions.push(subscription);
    held
}

fn bind_hold_time(
    field: &Rc<dyn Control>,
    store: &SharedStore,
    settings: &HoldTimeSettings,
    initial: String,
    write_failure: &WriteFailure,
    subscriptions: &mut Vec<Subscription>,
) -> Held<String> {
    field.set_value(&initial);

    let edits = field
        .observe(EventKind::Input)
        .map(|event| event.value.clone());
    let changes = Changes::new(initial.clone(), edits);
    let min = settings.min;

    let writer = StoreWriter::new(store, &settings.key, write_failure);
    subscriptions.push(
        changes
            .filter(move |value| is_hold_time_valid(value, min))
            .subscribe(move |value| writer.write(&codec::encode_hold_time(value))),
    );

    let field = Rc::clone(field);
    subscriptions.push(
        changes
            .map(move |value| is_hold_time_valid(value, min))
            .subscribe(move |valid| {
                if !valid {
                    debug!("Hold time rejected, not persisted");
                }
                field.set_attribute(INVALID_ATTRIBUTE, if *valid { "false" } else { "true" });
            }),
    );

    let (held, subscription) = hold(&changes, initial);
    subscriptions.push(subscription);
    held
}

/// Writes one key, recording the first failure instead of propagating it
struct StoreWriter {
    store: SharedStore,
    key: String,
    failure: WriteFailure,
}

impl StoreWriter {
    fn new(store: &SharedStore, key: &str, failure: &WriteFailure) -> Self {
        Self {
            store: Rc::clone(store),
            key: key.to_string(),
            failure: Rc::clone(failure),
        }
    }

    fn write(&self, value: &str) {
        match self.store.borrow_mut().set_item(&self.key, value) {
            Ok(()) => debug!("Stored {} = {}", self.key, value),
            Err(e) => {
                error!("Failed to store {}: {}", self.key, e);
                self.failure.borrow_mut().get_or_insert(e);
            }
        }
    }
}
