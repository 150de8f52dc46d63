//! MCP tool-server handles and tool-list aggregation

mod aggregate;
mod client;
mod types;


pub use aggregate::{AgentClients, McpAgentProvider, TOOL_NAME_SEPARATOR};
pub use client::{ClientConnector, DefaultConnector, HttpToolClient, StdioToolClient, ToolClient};
pub use types::{FunctionDefinition, ToolDefinition};

#[cfg(test)]
pub use client::MockToolClient;
