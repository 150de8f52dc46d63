//! Layered configuration loading

use super::env_loader;
use super::file_loader;
use super::model::Config;
use crate::error::GateResult;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "modelgate.json";

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Configuration from a JSON file
    File(PathBuf),
    /// Overrides from `MODELGATE_*` environment variables
    Environment,
    /// Built-in defaults
    Default,
}

/// Configuration loader with support for multiple sources
///
/// Sources are applied in the order they were added; later sources override
/// earlier ones.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(mut self) -> Self {
        self.sources.push(ConfigSource::Default);
        self
    }

    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources
            .push(ConfigSource::File(path.as_ref().to_path_buf()));
        self
    }

    pub fn with_env(mut self) -> Self {
        self.sources.push(ConfigSource::Environment);
        self
    }

    /// Load and validate the configuration
    pub fn load(self) -> GateResult<Config> {
        let mut config = Config::default();

        for source in &self.sources {
            match source {
                ConfigSource::File(path) => {
                    tracing::debug!("Loading config from file: {}", path.display());
                    config.merge(file_loader::load_from_file(path)?);
                }
                ConfigSource::Environment => {
                    tracing::debug!("Applying environment overrides");
                    env_loader::apply_env(&mut config)?;
                }
                ConfigSource::Default => {
                    tracing::debug!("Loading default config");
                    config.merge(Config::default());
                }
            }
        }

        config.validate()?;
        tracing::debug!(
            providers = config.providers.len(),
            default_provider = %config.default_provider,
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Config file used when none is given: `./modelgate.json` if present,
/// otherwise `modelgate/modelgate.json` under the user config directory
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join("modelgate").join(DEFAULT_CONFIG_FILE))
        .unwrap_or(local)
}

/// Load configuration from defaults, a file and the environment
pub fn load_config(path: Option<&Path>) -> GateResult<Config> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    ConfigLoader::new()
        .with_defaults()
        .with_file(path)
        .with_env()
        .load()
}
