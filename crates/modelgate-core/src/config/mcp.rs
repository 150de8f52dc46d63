//! MCP tool-server configuration
//!
//! Server definitions use the common `{"mcpServers": {...}}` document shape;
//! tool lists are kept as the raw JSON text each server advertised.

use crate::error::{GateError, GateResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Configuration for a single tool server
///
/// A server is either a local command speaking over stdio or a remote
/// endpoint reached by URL.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct McpServerConfig {
    /// Command to execute (stdio servers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
    /// Endpoint URL (remote servers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

impl McpServerConfig {
    /// Create a stdio server config
    pub fn stdio(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: Some(command.into()),
            args,
            ..Default::default()
        }
    }

    /// Create a remote server config
    pub fn http(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Named tool servers, ordered by name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct McpServersConfig {
    #[serde(rename = "mcpServers", default)]
    pub servers: BTreeMap<String, McpServerConfig>,
}

impl McpServersConfig {
    /// Parse a `{"mcpServers": {...}}` document
    pub fn from_json(text: &str) -> GateResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text).map_err(|e| {
            GateError::json(format!("Invalid MCP servers document: {}", e))
                .attach_context("Parsing mcpServers")
        })
    }

    pub fn insert(&mut self, name: impl Into<String>, server: McpServerConfig) {
        self.servers.insert(name.into(), server);
    }

    pub fn get(&self, name: &str) -> Option<&McpServerConfig> {
        self.servers.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &McpServerConfig)> {
        self.servers.iter()
    }
}

/// Tool list advertised by one server, with its enablement flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpToolsEntry {
    pub server_name: String,
    /// JSON array of OpenAI-shaped tool definitions
    pub tools: String,
    pub is_enabled: bool,
}

impl McpToolsEntry {
    pub fn new(server_name: impl Into<String>, tools: impl Into<String>, is_enabled: bool) -> Self {
        Self {
            server_name: server_name.into(),
            tools: tools.into(),
            is_enabled,
        }
    }
}

/// Tool-server section of the configuration file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct McpToolsConfig {
    #[serde(flatten)]
    pub servers: McpServersConfig,
    #[serde(default)]
    pub tools: Vec<McpToolsEntry>,
}

impl McpToolsConfig {
    /// Merge with another config (other takes precedence)
    pub fn merge(&mut self, other: McpToolsConfig) {
        for (name, server) in other.servers.servers {
            self.servers.insert(name, server);
        }
        if !other.tools.is_empty() {
            self.tools = other.tools;
        }
    }
}
