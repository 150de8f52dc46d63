//! File-based configuration loading

use super::model::Config;
use crate::error::{GateError, GateResult};
use std::fs;
use std::path::Path;

/// Load configuration from a JSON file
///
/// Returns the default config if the file doesn't exist.
pub fn load_from_file(path: &Path) -> GateResult<Config> {
    if !path.exists() {
        tracing::debug!("Config file {} not found, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        GateError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    serde_json::from_str(&content).map_err(|e| {
        GateError::config_with_context(
            format!("Failed to parse JSON config: {}", e),
            format!("Deserializing JSON configuration from '{}'", path.display()),
        )
    })
}
