//! End-to-end tests for the options page bound to an on-disk store

mod common;

use common::OptionsEnv;
use longclick_options::page::{Control, INVALID_ATTRIBUTE};

#[test]
fn test_first_load_uses_defaults_and_persists_them() {
    let env = OptionsEnv::new();
    let page = env.load();

    assert!(page.options.toggle.checked());
    assert!(!page.options.hold_time.disabled());
    assert_eq!(page.options.hold_time.value(), "1000");

    assert_eq!(env.stored("longClickToggle").as_deref(), Some("true"));
    assert_eq!(env.stored("holdTime").as_deref(), Some("\"1000\""));
}

#[test]
fn test_stored_false_unchecks_and_disables() {
    let env = OptionsEnv::new();
    env.seed(&[("longClickToggle", "false")]);

    let page = env.load();

    assert!(!page.options.toggle.checked());
    assert!(page.options.hold_time.disabled());
}

#[test]
fn test_typing_999_marks_invalid_and_keeps_store() {
    let env = OptionsEnv::new();
    env.seed(&[("holdTime", "\"1500\"")]);
    let page = env.load();

    page.options.hold_time.type_text("999");

    assert_eq!(
        page.options.hold_time.attribute(INVALID_ATTRIBUTE).as_deref(),
        Some("true")
    );
    assert_eq!(env.stored("holdTime").as_deref(), Some("\"1500\""));
}

#[test]
fn test_typing_1000_marks_valid_and_persists() {
    let env = OptionsEnv::new();
    env.seed(&[("holdTime", "\"2500\"")]);
    let page = env.load();

    page.options.hold_time.type_text("1000");

    assert_eq!(
        page.options.hold_time.attribute(INVALID_ATTRIBUTE).as_deref(),
        Some("false")
    );
    assert_eq!(env.stored("holdTime").as_deref(), Some("\"1000\""));
}

#[test]
fn test_toggle_on_enables_field_and_persists_synchronously() {
    let env = OptionsEnv::new();
    env.seed(&[("longClickToggle", "false")]);
    let page = env.load();
    assert!(page.options.hold_time.disabled());

    page.options.toggle.click();

    // Already on disk by the time the click returns
    assert_eq!(env.stored("longClickToggle").as_deref(), Some("true"));
    assert!(!page.options.hold_time.disabled());
    assert!(page.binder.long_click_enabled());
}

#[test]
fn test_reload_reproduces_control_states() {
    let env = OptionsEnv::new();
    {
        let page = env.load();
        page.options.toggle.click();
        page.options.toggle.click();
        page.options.toggle.click();
        // Disabled: typing is ignored
        assert!(!page.options.hold_time.type_text("3000"));
    }
    let first = env.load().options.snapshot();
    let second = env.load().options.snapshot();

    assert_eq!(first, second);
    let toggle = first.control("longClickToggle").unwrap();
    assert_eq!(toggle.checked, Some(false));
}

#[test]
fn test_edits_survive_reload() {
    let env = OptionsEnv::new();
    {
        let page = env.load();
        for keystroke in ["4", "45", "450", "4500", "450"] {
            page.options.hold_time.type_text(keystroke);
        }
        // Last keystroke is invalid, the field shows it anyway
        assert_eq!(page.options.hold_time.value(), "450");
        assert!(!page.binder.hold_time_valid());
    }

    let reloaded = env.load();
    assert_eq!(reloaded.options.hold_time.value(), "4500");
    assert!(reloaded.binder.hold_time_valid());
    assert_eq!(
        reloaded.options.hold_time.attribute(INVALID_ATTRIBUTE).as_deref(),
        Some("false")
    );
}

#[test]
fn test_custom_keys_and_minimum() {
    let mut env = OptionsEnv::new();
    env.config.toggle.key = "lc.enabled".to_string();
    env.config.hold_time.key = "lc.holdMs".to_string();
    env.config.hold_time.default = "300".to_string();
    env.config.hold_time.min = 250;

    let page = env.load();
    page.options.hold_time.type_text("260");

    assert_eq!(env.stored("lc.enabled").as_deref(), Some("true"));
    assert_eq!(env.stored("lc.holdMs").as_deref(), Some("\"260\""));
    assert_eq!(env.stored("holdTime"), None);
}

#[test]
fn test_page_and_store_handles_agree() {
    let env = OptionsEnv::new();
    let page = env.load();
    page.options.hold_time.type_text("1234");

    let via_page = page.options.page.get("holdTime").unwrap();
    assert_eq!(via_page.value(), "1234");
    assert_eq!(
        page.store.borrow().items().get("holdTime").map(String::as_str),
        Some("\"1234\"")
    );
}
