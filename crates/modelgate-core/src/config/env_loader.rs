//! Environment variable configuration overrides
//!
//! Global settings use the `MODELGATE_` prefix. Provider settings are
//! addressed by the provider's configured name, upper-cased with every
//! non-alphanumeric character replaced by `_`:
//!
//! | variable                         | field        |
//! |----------------------------------|--------------|
//! | `MODELGATE_DEFAULT_PROVIDER`     | default provider |
//! | `MODELGATE_LOG_LEVEL`            | log level    |
//! | `MODELGATE_<NAME>_MODEL`         | `sub_type`   |
//! | `MODELGATE_<NAME>_ENDPOINT`      | `endpoint`   |
//! | `MODELGATE_<NAME>_SECRET_ID`     | `secret_id`  |
//! | `MODELGATE_<NAME>_SECRET_KEY`    | `secret_key` |
//! | `MODELGATE_<NAME>_MAX_TOKENS`    | `max_tokens` |

use super::model::Config;
use crate::error::{GateError, GateResult};

const PREFIX: &str = "MODELGATE";

/// Apply overrides from the process environment
pub fn apply_env(config: &mut Config) -> GateResult<()> {
    apply_env_with(config, |key| std::env::var(key).ok())
}

/// Apply overrides using a custom variable lookup
pub fn apply_env_with<F>(config: &mut Config, lookup: F) -> GateResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(provider) = lookup(&format!("{}_DEFAULT_PROVIDER", PREFIX)) {
        config.default_provider = provider;
    }

    if let Some(level) = lookup(&format!("{}_LOG_LEVEL", PREFIX)) {
        config.logging.level = level;
    }

    for (name, settings) in config.providers.iter_mut() {
        let env_prefix = format!("{}_{}", PREFIX, env_name(name));

        if let Some(model) = lookup(&format!("{}_MODEL", env_prefix)) {
            settings.sub_type = model;
        }
        if let Some(endpoint) = lookup(&format!("{}_ENDPOINT", env_prefix)) {
            settings.endpoint = endpoint;
        }
        if let Some(secret_id) = lookup(&format!("{}_SECRET_ID", env_prefix)) {
            settings.secret_id = Some(secret_id);
        }
        if let Some(secret_key) = lookup(&format!("{}_SECRET_KEY", env_prefix)) {
            settings.secret_key = Some(secret_key);
        }
        if let Some(max_tokens) = lookup(&format!("{}_MAX_TOKENS", env_prefix)) {
            let parsed = max_tokens.parse().map_err(|_| {
                GateError::config_with_context(
                    format!("Invalid {}_MAX_TOKENS value", env_prefix),
                    format!(
                        "Parsing max_tokens value '{}' for provider '{}'",
                        max_tokens, name
                    ),
                )
            })?;
            settings.max_tokens = Some(parsed);
        }
    }

    if let Some(embedding) = config.embedding.as_mut() {
        if let Some(key) = lookup(&format!("{}_EMBEDDING_SECRET_KEY", PREFIX)) {
            embedding.secret_key = Some(key);
        }
        if let Some(url) = lookup(&format!("{}_EMBEDDING_URL", PREFIX)) {
            embedding.provider_url = url;
        }
    }

    Ok(())
}

fn env_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
