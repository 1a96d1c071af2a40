//! Init command implementation

use anyhow::{Result, bail};
use tracing::info;

use super::Target;

/// Default configuration content for longclick-options init
pub const DEFAULT_CONFIG: &str = r#"# Long-click options configuration
# ================================
#
# Every value below is the built-in default; delete a line to keep it.

# ============================================================================
# STORE - Where the settings are persisted
# ============================================================================
#
# The store is a JSON object mapping each key to its JSON-encoded value.
# Default location: ~/.longclick/storage.json
[store]
# path = "/path/to/storage.json"

# ============================================================================
# TOGGLE - The long-click checkbox
# ============================================================================
#
#   key        - Storage key (value stored as a JSON boolean)
#   element_id - Id of the checkbox on the options page
#   default    - Used when nothing is stored
[toggle]
key = "longClickToggle"
element_id = "longClickToggle"
default = true

# ============================================================================
# HOLD TIME - Milliseconds a press must last to count as a long click
# ============================================================================
#
#   key        - Storage key (value stored as a JSON string, e.g. "\"1000\"")
#   element_id - Id of the text field on the options page
#   default    - Used when nothing is stored
#   min        - Values below this are marked invalid and never stored
[hold_time]
key = "holdTime"
element_id = "holdTime"
default = "1000"
min = 1000
"#;

/// Write the default config file
pub fn init_command(target: &Target, force: bool) -> Result<()> {
    let config_path = &target.config_path;

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    // Create parent directory (if any)
    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    info!("Wrote default config");
    println!("Created: {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use longclick_options::OptionsConfig;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: OptionsConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, OptionsConfig::default());
    }
}
