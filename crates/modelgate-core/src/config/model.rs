//! Top-level configuration model

use super::logging::LoggingConfig;
use super::mcp::McpToolsConfig;
use super::provider::{EmbeddingSettings, ProviderSettings};
use crate::error::{GateError, GateResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete modelgate configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Name of the provider used when none is requested explicitly
    #[serde(default)]
    pub default_provider: String,
    /// Chat providers by name
    #[serde(default)]
    pub providers: HashMap<String, ProviderSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<EmbeddingSettings>,
    #[serde(default)]
    pub mcp: McpToolsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Merge with another config (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if !other.default_provider.is_empty() {
            self.default_provider = other.default_provider;
        }

        for (name, settings) in other.providers {
            self.providers.insert(name, settings);
        }

        if other.embedding.is_some() {
            self.embedding = other.embedding;
        }

        self.mcp.merge(other.mcp);
        self.logging.merge(other.logging);
    }

    /// Look up a provider by name, falling back to the default provider
    pub fn provider(&self, name: Option<&str>) -> GateResult<(&str, &ProviderSettings)> {
        let name = name.unwrap_or(&self.default_provider);
        if name.is_empty() {
            return Err(GateError::config(
                "No provider requested and no default_provider configured",
            ));
        }
        self.providers
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| GateError::config(format!("Unknown provider '{}'", name)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> GateResult<()> {
        if !self.default_provider.is_empty() && !self.providers.contains_key(&self.default_provider)
        {
            return Err(GateError::config_with_context(
                format!(
                    "Default provider '{}' is not configured",
                    self.default_provider
                ),
                "Validating default_provider",
            ));
        }

        for (name, settings) in &self.providers {
            settings.validate(name)?;
        }

        if let Some(embedding) = &self.embedding {
            if embedding.provider_url.trim().is_empty() {
                return Err(GateError::config("Embedding provider_url must not be empty"));
            }
            embedding.timeouts.validate()?;
        }

        Ok(())
    }
}
