//! CLI command implementations

pub mod init;
pub mod options;
pub mod reset;

use std::path::PathBuf;

use anyhow::Result;

use longclick_options::OptionsConfig;

/// Where a command reads its config and store from
pub struct Target {
    pub config_path: PathBuf,
    pub store_override: Option<PathBuf>,
    pub json: bool,
}

impl Target {
    /// Load the config, applying the `--store` override
    pub fn load_config(&self) -> Result<OptionsConfig> {
        let mut config = OptionsConfig::load_or_default(&self.config_path)?;
        if let Some(store) = &self.store_override {
            config.store.path = Some(store.clone());
        }
        Ok(config)
    }
}
