//! Configuration loading and management

mod io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Where the settings are persisted
    #[serde(default)]
    pub store: StoreSettings,

    /// Long-click toggle (checkbox)
    #[serde(default)]
    pub toggle: ToggleSettings,

    /// Hold time in milliseconds (text field)
    #[serde(default)]
    pub hold_time: HoldTimeSettings,
}

/// Store settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// JSON store file
    /// Default: ~/.longclick/storage.json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StoreSettings {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(OptionsConfig::default_store_path)
    }
}

/// Toggle settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSettings {
    /// Storage key
    #[serde(default = "default_toggle_key")]
    pub key: String,

    /// Id of the checkbox control
    #[serde(default = "default_toggle_element_id")]
    pub element_id: String,

    /// Value used when nothing is stored
    #[serde(default = "default_toggle_default")]
    pub default: bool,
}

/// Hold time settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldTimeSettings {
    /// Storage key
    #[serde(default = "default_hold_time_key")]
    pub key: String,

    /// Id of the text control
    #[serde(default = "default_hold_time_element_id")]
    pub element_id: String,

    /// Value used when nothing is stored, in its decimal string form
    #[serde(default = "default_hold_time_default")]
    pub default: String,

    /// Smallest hold time (ms) that is accepted and persisted
    #[serde(default = "default_hold_time_min")]
    pub min: i64,
}

fn default_toggle_key() -> String {
    "longClickToggle".to_string()
}

fn default_toggle_element_id() -> String {
    "longClickToggle".to_string()
}

fn default_toggle_default() -> bool {
    true
}

fn default_hold_time_key() -> String {
    "holdTime".to_string()
}

fn default_hold_time_element_id() -> String {
    "holdTime".to_string()
}

fn default_hold_time_default() -> String {
    "1000".to_string()
}

fn default_hold_time_min() -> i64 {
    1000
}

impl Default for ToggleSettings {
    fn default() -> Self {
        Self {
            key: default_toggle_key(),
            element_id: default_toggle_element_id(),
            default: default_toggle_default(),
        }
    }
}

impl Default for HoldTimeSettings {
    fn default() -> Self {
        Self {
            key: default_hold_time_key(),
            element_id: default_hold_time_element_id(),
            default: default_hold_time_default(),
            min: default_hold_time_min(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: OptionsConfig = toml::from_str("").unwrap();
        assert_eq!(config, OptionsConfig::default());
        assert_eq!(config.toggle.key, "longClickToggle");
        assert!(config.toggle.default);
        assert_eq!(config.hold_time.key, "holdTime");
        assert_eq!(config.hold_time.default, "1000");
        assert_eq!(config.hold_time.min, 1000);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: OptionsConfig = toml::from_str(
            r#"
[hold_time]
min = 250

[store]
path = "/tmp/options.json"
"#,
        )
        .unwrap();

        assert_eq!(config.hold_time.min, 250);
        assert_eq!(config.hold_time.key, "holdTime");
        assert_eq!(config.toggle, ToggleSettings::default());
        assert_eq!(
            config.store.resolved_path(),
            PathBuf::from("/tmp/options.json")
        );
    }

    #[test]
    fn test_default_store_path_lives_in_config_dir() {
        let config = OptionsConfig::default();
        assert!(config
            .store
            .resolved_path()
            .starts_with(OptionsConfig::config_dir()));
    }
}
