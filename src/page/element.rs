//! In-memory form element

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{debug, warn};

use super::control::{Control, ControlEvent, ControlKind, EventKind};
use crate::stream::{Stream, Subject};

#[derive(Debug, Default)]
struct ElementState {
    checked: bool,
    value: String,
    disabled: bool,
    attributes: BTreeMap<String, String>,
}

/// A checkbox or text field living in a [`super::Page`]
///
/// [`Element::click`] and [`Element::type_text`] stand in for the user: they
/// change the element's state and dispatch the matching notification. All
/// [`Control`] setters are silent.
pub struct Element {
    id: String,
    kind: ControlKind,
    state: RefCell<ElementState>,
    change: Subject<ControlEvent>,
    input: Subject<ControlEvent>,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: ControlKind) -> Rc<Self> {
        Rc::new(Self {
            id: id.into(),
            kind,
            state: RefCell::new(ElementState::default()),
            change: Subject::new(),
            input: Subject::new(),
        })
    }

    pub fn checkbox(id: impl Into<String>) -> Rc<Self> {
        Self::new(id, ControlKind::Checkbox)
    }

    pub fn text(id: impl Into<String>) -> Rc<Self> {
        Self::new(id, ControlKind::Text)
    }

    /// Flip a checkbox and dispatch `change`.
    ///
    /// Returns false when nothing happened: the element is disabled or is
    /// not a checkbox.
    pub fn click(&self) -> bool {
        if !self.accepts_user_input(ControlKind::Checkbox) {
            return false;
        }
        {
            let mut state = self.state.borrow_mut();
            state.checked = !state.checked;
        }
        self.dispatch(EventKind::Change);
        true
    }

    /// Replace a text field's value and dispatch `input`.
    ///
    /// Returns false when the element is disabled or is not a text field.
    pub fn type_text(&self, value: &str) -> bool {
        if !self.accepts_user_input(ControlKind::Text) {
            return false;
        }
        self.state.borrow_mut().value = value.to_string();
        self.dispatch(EventKind::Input);
        true
    }

    fn accepts_user_input(&self, expected: ControlKind) -> bool {
        if self.kind != expected {
            debug!("Ignoring {} interaction on {} #{}", expected, self.kind, self.id);
            return false;
        }
        if self.state.borrow().disabled {
            warn!("Ignoring interaction with disabled control #{}", self.id);
            return false;
        }
        true
    }

    fn dispatch(&self, kind: EventKind) {
        // Release the state borrow before subscribers run; they may write back
        let event = {
            let state = self.state.borrow();
            ControlEvent {
                kind,
                target_id: self.id.clone(),
                checked: state.checked,
                value: state.value.clone(),
            }
        };
        debug!("Dispatching {:?} on #{}", kind, self.id);
        self.subject(kind).emit(&event);
    }

    fn subject(&self, kind: EventKind) -> &Subject<ControlEvent> {
        match kind {
            EventKind::Change => &self.change,
            EventKind::Input => &self.input,
        }
    }
}

impl Control for Element {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn checked(&self) -> bool {
        self.state.borrow().checked
    }

    fn set_checked(&self, checked: bool) {
        self.state.borrow_mut().checked = checked;
    }

    fn value(&self) -> String {
        self.state.borrow().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.state.borrow_mut().value = value.to_string();
    }

    fn disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    fn set_disabled(&self, disabled: bool) {
        self.state.borrow_mut().disabled = disabled;
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn attributes(&self) -> BTreeMap<String, String> {
        self.state.borrow().attributes.clone()
    }

    fn observe(&self, kind: EventKind) -> Stream<ControlEvent> {
        self.subject(kind).stream()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(stream: &Stream<ControlEvent>) -> Rc<RefCell<Vec<ControlEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        stream.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        seen
    }

    #[test]
    fn test_click_toggles_and_dispatches_change() {
        let checkbox = Element::checkbox("toggle");
        let seen = record(&checkbox.observe(EventKind::Change));

        assert!(checkbox.click());
        assert!(checkbox.checked());
        assert!(checkbox.click());
        assert!(!checkbox.checked());

        let checked: Vec<bool> = seen.borrow().iter().map(|e| e.checked).collect();
        assert_eq!(checked, vec![true, false]);
        assert_eq!(seen.borrow()[0].target_id, "toggle");
    }

    #[test]
    fn test_type_text_dispatches_input() {
        let field = Element::text("hold");
        let seen = record(&field.observe(EventKind::Input));

        assert!(field.type_text("12"));
        assert!(field.type_text("1200"));

        let values: Vec<String> = seen.borrow().iter().map(|e| e.value.clone()).collect();
        assert_eq!(values, vec!["12", "1200"]);
        assert_eq!(field.value(), "1200");
    }

    #[test]
    fn test_programmatic_setters_are_silent() {
        let field = Element::text("hold");
        let checkbox = Element::checkbox("toggle");
        let inputs = record(&field.observe(EventKind::Input));
        let changes = record(&checkbox.observe(EventKind::Change));

        field.set_value("5000");
        field.set_attribute("aria-invalid", "false");
        checkbox.set_checked(true);

        assert!(inputs.borrow().is_empty());
        assert!(changes.borrow().is_empty());
        assert_eq!(field.attribute("aria-invalid").as_deref(), Some("false"));
    }

    #[test]
    fn test_disabled_element_ignores_user() {
        let field = Element::text("hold");
        let seen = record(&field.observe(EventKind::Input));
        field.set_value("1000");
        field.set_disabled(true);

        assert!(!field.type_text("42"));
        assert_eq!(field.value(), "1000");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_wrong_kind_interaction_is_ignored() {
        let field = Element::text("hold");
        let checkbox = Element::checkbox("toggle");

        assert!(!field.click());
        assert!(!checkbox.type_text("1000"));
        assert!(!checkbox.checked());
    }

    #[test]
    fn test_subscriber_can_write_back_into_target() {
        let field = Element::text("hold");
        let target = Rc::clone(&field);
        field
            .observe(EventKind::Input)
            .subscribe(move |event| target.set_value(&event.value.to_uppercase()));

        field.type_text("abc");

        assert_eq!(field.value(), "ABC");
    }
}
