mod config;
pub mod plan_store;

pub use config::{Config, DisplayConfig, LunchConfig, PlannerConfig};
pub use plan_store::{PlanStore, PlannerState};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the directory holding `config.toml` and `state.json`.
///
/// `SKILLPLAN_DATA_DIR` overrides the location outright. Otherwise the
/// directory is `~/.config/skillplan[-dev]/`, with `SKILLPLAN_ENV=dev`
/// selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SKILLPLAN_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("SKILLPLAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("skillplan-dev")
            } else {
                base_dir.join("skillplan")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
