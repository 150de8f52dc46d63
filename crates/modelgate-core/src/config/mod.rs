//! Configuration management

pub mod env_loader;
pub mod file_loader;
pub mod loader;
pub mod logging;
pub mod mcp;
pub mod model;
pub mod provider;
pub mod timeouts;

pub use loader::{ConfigLoader, ConfigSource, DEFAULT_CONFIG_FILE, default_config_path, load_config};
pub use logging::{LogFormat, LoggingConfig};
pub use mcp::{McpServerConfig, McpServersConfig, McpToolsConfig, McpToolsEntry};
pub use model::Config;
pub use provider::{EmbeddingKind, EmbeddingSettings, ProviderKind, ProviderSettings};
pub use timeouts::TimeoutConfig;
