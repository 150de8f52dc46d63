//! Tool aggregation for multi-server (MCP) agent sessions

pub mod mcp_tools;

pub use mcp_tools::{
    AgentClients, ClientConnector, DefaultConnector, FunctionDefinition, HttpToolClient,
    McpAgentProvider, StdioToolClient, ToolClient, ToolDefinition,
};
