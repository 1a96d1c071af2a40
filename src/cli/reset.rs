//! Reset command implementation

use anyhow::{Context, Result};
use tracing::info;

use longclick_options::{FileStore, SettingStore};

use super::Target;

/// Remove both settings from the store so the defaults apply again
pub fn reset_command(target: &Target) -> Result<()> {
    let config = target.load_config()?;
    let store_path = config.store.resolved_path();

    let mut store = FileStore::open(&store_path)
        .with_context(|| format!("Failed to open store: {}", store_path.display()))?;

    for key in [&config.toggle.key, &config.hold_time.key] {
        store
            .remove_item(key)
            .with_context(|| format!("Failed to remove '{}'", key))?;
        info!("Removed {}", key);
    }

    println!("Reset settings in {}", store_path.display());
    Ok(())
}
