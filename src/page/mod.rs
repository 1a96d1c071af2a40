//! Options page model
//!
//! The page is a registry of form controls addressed by id, the way the
//! options markup addresses them. [`OptionsPage`] builds the two controls the
//! long-click settings need and keeps concrete handles for driving them.

mod control;
mod element;

pub use control::{Control, ControlEvent, ControlKind, EventKind, INVALID_ATTRIBUTE};
pub use element::Element;

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;

use crate::config::OptionsConfig;

/// Id-addressable set of controls
#[derive(Default)]
pub struct Page {
    controls: BTreeMap<String, Rc<dyn Control>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control, replacing any control with the same id
    pub fn insert(&mut self, control: Rc<dyn Control>) {
        self.controls.insert(control.id().to_string(), control);
    }

    pub fn get(&self, id: &str) -> Option<Rc<dyn Control>> {
        self.controls.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            controls: self
                .controls
                .values()
                .map(|control| ControlSnapshot::of(control.as_ref()))
                .collect(),
        }
    }
}

/// Serializable state of one control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlSnapshot {
    pub id: String,
    pub kind: ControlKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub disabled: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl ControlSnapshot {
    pub fn of(control: &dyn Control) -> Self {
        let kind = control.kind();
        Self {
            id: control.id().to_string(),
            kind,
            checked: (kind == ControlKind::Checkbox).then(|| control.checked()),
            value: (kind == ControlKind::Text).then(|| control.value()),
            disabled: control.disabled(),
            attributes: control.attributes(),
        }
    }
}

/// Serializable state of a whole page, ordered by control id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub controls: Vec<ControlSnapshot>,
}

impl PageSnapshot {
    pub fn control(&self, id: &str) -> Option<&ControlSnapshot> {
        self.controls.iter().find(|control| control.id == id)
    }
}

/// The long-click options markup: a toggle checkbox and a hold-time field
pub struct OptionsPage {
    pub page: Page,
    pub toggle: Rc<Element>,
    pub hold_time: Rc<Element>,
}

impl OptionsPage {
    pub fn new(config: &OptionsConfig) -> Self {
        let toggle = Element::checkbox(&config.toggle.element_id);
        let hold_time = Element::text(&config.hold_time.element_id);

        let mut page = Page::new();
        page.insert(toggle.clone());
        page.insert(hold_time.clone());

        Self {
            page,
            toggle,
            hold_time,
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.page.snapshot()
    }
}
