//! Form control capability
//!
//! A [`Control`] behaves like a DOM form element: its properties are set
//! through a shared reference, and its user-driven notifications are
//! observed as [`Stream`]s.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stream::Stream;

/// Attribute used to mark a control's current value as invalid
pub const INVALID_ATTRIBUTE: &str = "aria-invalid";

/// What kind of form element a control is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Checkbox,
    Text,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::Checkbox => write!(f, "checkbox"),
            ControlKind::Text => write!(f, "text"),
        }
    }
}

/// Native notification a control can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Committed change, fired by checkboxes
    Change,
    /// Every edit of a text value
    Input,
}

/// Notification payload, a snapshot of the target at dispatch time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEvent {
    pub kind: EventKind,
    pub target_id: String,
    pub checked: bool,
    pub value: String,
}

/// Read/write/observe capability over a single form control.
///
/// Setters are programmatic: they never dispatch events, so writing a value
/// back into the control that produced it cannot loop.
pub trait Control {
    fn id(&self) -> &str;

    fn kind(&self) -> ControlKind;

    fn checked(&self) -> bool;

    fn set_checked(&self, checked: bool);

    fn value(&self) -> String;

    fn set_value(&self, value: &str);

    fn disabled(&self) -> bool;

    fn set_disabled(&self, disabled: bool);

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn attributes(&self) -> BTreeMap<String, String>;

    /// Stream of user-driven notifications of the given kind
    fn observe(&self, kind: EventKind) -> Stream<ControlEvent>;
}
