//! Options page commands
//!
//! Each command loads the page the way a browser would: bind the controls to
//! the store (which re-persists the initial values), optionally perform one
//! user interaction, then print what the page and the store look like.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::warn;

use longclick_options::page::{ControlKind, PageSnapshot};
use longclick_options::store::shared;
use longclick_options::{FileStore, OptionsPage, SettingsBinder};

use super::Target;

/// Load the page and print its state
pub fn show_command(target: &Target) -> Result<()> {
    run(target, |_| Ok(()))
}

/// Click the long-click checkbox
pub fn toggle_command(target: &Target) -> Result<()> {
    run(target, |options| {
        if !options.toggle.click() {
            warn!("Long-click checkbox did not respond");
        }
        Ok(())
    })
}

/// Type `value` into the hold time field
pub fn hold_time_command(target: &Target, value: &str) -> Result<()> {
    run(target, |options| {
        if !options.hold_time.type_text(value) {
            bail!("Hold time field is disabled; enable long clicks first");
        }
        Ok(())
    })
}

#[derive(Serialize)]
struct Report {
    long_click_enabled: bool,
    hold_time: String,
    hold_time_valid: bool,
    page: PageSnapshot,
    store_path: PathBuf,
    stored: BTreeMap<String, String>,
}

fn run(target: &Target, interact: impl FnOnce(&OptionsPage) -> Result<()>) -> Result<()> {
    let config = target.load_config()?;
    let store_path = config.store.resolved_path();

    let store = shared(
        FileStore::open(&store_path)
            .with_context(|| format!("Failed to open store: {}", store_path.display()))?,
    );
    let options = OptionsPage::new(&config);
    let binder = SettingsBinder::bind(&options.page, store.clone(), &config)
        .with_context(|| format!("Failed to bind options page to {}", store_path.display()))?;

    interact(&options)?;

    if let Some(err) = binder.take_write_error() {
        return Err(err).context("Failed to persist setting");
    }

    let stored = store.borrow().items().clone();
    let report = Report {
        long_click_enabled: binder.long_click_enabled(),
        hold_time: binder.hold_time(),
        hold_time_valid: binder.hold_time_valid(),
        page: options.snapshot(),
        store_path,
        stored,
    };

    if target.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &Report) {
    println!(
        "Long clicks: {}",
        if report.long_click_enabled { "enabled" } else { "disabled" }
    );
    if report.hold_time_valid {
        println!("Hold time:   {} ms", report.hold_time);
    } else {
        println!("Hold time:   {:?} (invalid, not saved)", report.hold_time);
    }

    println!("\nControls:");
    for control in &report.page.controls {
        let mut line = format!("  #{} [{}]", control.id, control.kind);
        match control.kind {
            ControlKind::Checkbox => {
                if control.checked == Some(true) {
                    line.push_str(" checked");
                }
            }
            ControlKind::Text => {
                line.push_str(&format!(" value={:?}", control.value.as_deref().unwrap_or("")));
            }
        }
        if control.disabled {
            line.push_str(" disabled");
        }
        for (name, value) in &control.attributes {
            line.push_str(&format!(" {}={}", name, value));
        }
        println!("{}", line);
    }

    println!("\nStore ({}):", report.store_path.display());
    if report.stored.is_empty() {
        println!("  (empty)");
    }
    for (key, value) in &report.stored {
        println!("  {} = {}", key, value);
    }
}
