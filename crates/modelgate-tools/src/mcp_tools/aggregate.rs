//! Merge tool lists of several servers into one agent session

use super::client::{ClientConnector, ToolClient};
use super::types::ToolDefinition;
use modelgate_core::config::{McpServersConfig, McpToolsEntry};
use modelgate_core::error::{GateError, GateResult};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Joins a server name and a tool name in merged tool lists
pub const TOOL_NAME_SEPARATOR: &str = "__";

/// Live tool-server handles plus the merged tool list
pub struct AgentClients {
    pub clients: HashMap<String, Box<dyn ToolClient>>,
    pub tools: Vec<ToolDefinition>,
}

impl AgentClients {
    /// Close every remaining handle
    pub async fn close_all(&mut self) {
        close_clients(&mut self.clients).await;
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(ToolDefinition::name).collect()
    }
}

impl std::fmt::Debug for AgentClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut servers: Vec<&String> = self.clients.keys().collect();
        servers.sort();
        f.debug_struct("AgentClients")
            .field("clients", &servers)
            .field("tools", &self.tools)
            .finish()
    }
}

async fn close_clients(clients: &mut HashMap<String, Box<dyn ToolClient>>) {
    for (name, mut client) in clients.drain() {
        if let Err(e) = client.close().await {
            warn!(server = %name, "failed to close tool server: {}", e);
        }
    }
}

/// Agent provider configured with tool servers and their advertised tools
#[derive(Debug, Clone)]
pub struct McpAgentProvider {
    pub typ: String,
    pub sub_type: String,
    pub mcp_servers: McpServersConfig,
    pub mcp_tools: Vec<McpToolsEntry>,
}

impl McpAgentProvider {
    pub fn new(
        typ: impl Into<String>,
        sub_type: impl Into<String>,
        mcp_servers: McpServersConfig,
        mcp_tools: Vec<McpToolsEntry>,
    ) -> Self {
        Self {
            typ: typ.into(),
            sub_type: sub_type.into(),
            mcp_servers,
            mcp_tools,
        }
    }

    /// Connect every configured server and merge the enabled tool lists
    ///
    /// Tools are renamed `"{server}__{tool}"` and kept in entry order, then
    /// tool order. Handles of disabled entries are closed and removed. If any
    /// enabled tool list fails to parse, every handle is closed and no tools
    /// are returned.
    pub async fn agent_clients(&self, connector: &dyn ClientConnector) -> GateResult<AgentClients> {
        let mut clients = self.connect_all(connector).await?;

        let mut tools = Vec::new();
        for entry in self.mcp_tools.iter().filter(|e| e.is_enabled) {
            let parsed = match ToolDefinition::parse_list(&entry.tools) {
                Ok(parsed) => parsed,
                Err(e) => {
                    close_clients(&mut clients).await;
                    return Err(GateError::json(format!("Invalid tool list: {}", e))
                        .attach_context(format!("Parsing tools of server '{}'", entry.server_name)));
                }
            };
            if !clients.contains_key(&entry.server_name) {
                warn!(server = %entry.server_name, "enabled tools have no connected server");
            }
            tools.extend(parsed.into_iter().map(|mut tool| {
                tool.function.name = format!(
                    "{}{}{}",
                    entry.server_name, TOOL_NAME_SEPARATOR, tool.function.name
                );
                tool
            }));
        }

        for entry in self.mcp_tools.iter().filter(|e| !e.is_enabled) {
            match clients.remove(&entry.server_name) {
                Some(mut client) => {
                    debug!(server = %entry.server_name, "closing disabled tool server");
                    if let Err(e) = client.close().await {
                        warn!(server = %entry.server_name, "failed to close tool server: {}", e);
                    }
                }
                None => warn!(server = %entry.server_name, "disabled tools have no connected server"),
            }
        }

        info!(
            servers = clients.len(),
            tools = tools.len(),
            "aggregated agent tools"
        );
        Ok(AgentClients { clients, tools })
    }

    async fn connect_all(
        &self,
        connector: &dyn ClientConnector,
    ) -> GateResult<HashMap<String, Box<dyn ToolClient>>> {
        let mut clients: HashMap<String, Box<dyn ToolClient>> = HashMap::new();
        for (name, config) in self.mcp_servers.iter() {
            match connector.connect(name, config).await {
                Ok(client) => {
                    debug!(server = %name, "connected tool server");
                    clients.insert(name.clone(), client);
                }
                Err(e) => {
                    close_clients(&mut clients).await;
                    return Err(e.attach_context(format!("Connecting tool server '{}'", name)));
                }
            }
        }
        Ok(clients)
    }
}
