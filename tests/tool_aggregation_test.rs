//! Tool aggregation across crates with recording handles

use async_trait::async_trait;
use modelgate::GateResult;
use modelgate::config::{McpServerConfig, McpServersConfig, McpToolsEntry};
use modelgate::tools::{ClientConnector, McpAgentProvider, ToolClient};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct CloseLog(Arc<Mutex<Vec<String>>>);

impl CloseLog {
    fn closed(&self) -> Vec<String> {
        let mut names = self.0.lock().unwrap().clone();
        names.sort();
        names
    }
}

struct RecordingClient {
    name: String,
    log: CloseLog,
}

#[async_trait]
impl ToolClient for RecordingClient {
    fn server_name(&self) -> &str {
        &self.name
    }

    async fn close(&mut self) -> GateResult<()> {
        self.log.0.lock().unwrap().push(self.name.clone());
        Ok(())
    }
}

struct RecordingConnector {
    log: CloseLog,
}

#[async_trait]
impl ClientConnector for RecordingConnector {
    async fn connect(&self, name: &str, _config: &McpServerConfig) -> GateResult<Box<dyn ToolClient>> {
        Ok(Box::new(RecordingClient {
            name: name.to_string(),
            log: self.log.clone(),
        }))
    }
}

fn servers_document() -> McpServersConfig {
    McpServersConfig::from_json(
        r#"{
            "mcpServers": {
                "calendar": {"url": "https://calendar.example.com/mcp"},
                "files": {"command": "files-server", "args": ["--root", "/srv"]},
                "weather": {"command": "weather-server"}
            }
        }"#,
    )
    .unwrap()
}

#[tokio::test]
async fn test_aggregates_from_servers_document() {
    let log = CloseLog::default();
    let connector = RecordingConnector { log: log.clone() };
    let provider = McpAgentProvider::new(
        "MCP",
        "Default",
        servers_document(),
        vec![
            McpToolsEntry::new(
                "weather",
                r#"[{"type":"function","function":{"name":"forecast","parameters":{"type":"object","properties":{"city":{"type":"string"}}}}}]"#,
                true,
            ),
            McpToolsEntry::new("files", r#"[{"type":"function","function":{"name":"read"}}]"#, false),
            McpToolsEntry::new(
                "calendar",
                r#"[{"type":"function","function":{"name":"list"}},{"type":"function","function":{"name":"create"}}]"#,
                true,
            ),
        ],
    );

    let agent = provider.agent_clients(&connector).await.unwrap();

    assert_eq!(
        agent.tool_names(),
        vec!["weather__forecast", "calendar__list", "calendar__create"]
    );
    assert_eq!(
        agent.tools[0].function.parameters.as_ref().unwrap()["properties"]["city"]["type"],
        "string"
    );
    assert_eq!(log.closed(), vec!["files".to_string()]);

    let mut remaining: Vec<&String> = agent.clients.keys().collect();
    remaining.sort();
    assert_eq!(remaining, vec!["calendar", "weather"]);
}

#[tokio::test]
async fn test_colliding_tool_names_are_namespaced() {
    let servers = McpServersConfig::from_json(
        r#"{
            "mcpServers": {
                "serviceA": {"command": "a-server"},
                "serviceB": {"url": "https://b.example.com/mcp"},
                "serviceC": {"command": "c-server"}
            }
        }"#,
    )
    .unwrap();
    let search = r#"[{"type":"function","function":{"name":"search","description":"Find things"}}]"#;

    let log = CloseLog::default();
    let connector = RecordingConnector { log: log.clone() };
    let provider = McpAgentProvider::new(
        "MCP",
        "Default",
        servers,
        vec![
            McpToolsEntry::new("serviceA", search, true),
            McpToolsEntry::new("serviceB", search, true),
            McpToolsEntry::new("serviceC", search, false),
        ],
    );

    let agent = provider.agent_clients(&connector).await.unwrap();

    assert_eq!(agent.tool_names(), vec!["serviceA__search", "serviceB__search"]);
    assert!(
        agent
            .tools
            .iter()
            .all(|tool| tool.function.description.as_deref() == Some("Find things"))
    );
    assert_eq!(log.closed(), vec!["serviceC".to_string()]);
    assert!(!agent.clients.contains_key("serviceC"));
    assert_eq!(agent.clients.len(), 2);
}

#[tokio::test]
async fn test_parse_failure_closes_every_handle() {
    let log = CloseLog::default();
    let connector = RecordingConnector { log: log.clone() };
    let provider = McpAgentProvider::new(
        "MCP",
        "Default",
        servers_document(),
        vec![McpToolsEntry::new("weather", "{\"not\": \"a list\"}", true)],
    );

    assert!(provider.agent_clients(&connector).await.is_err());
    assert_eq!(log.closed(), vec!["calendar", "files", "weather"]);
}
