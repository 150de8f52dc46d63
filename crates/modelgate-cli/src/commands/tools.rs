//! `modelgate tools`

use modelgate_core::config::Config;
use modelgate_tools::{DefaultConnector, McpAgentProvider};

pub async fn run(config: &Config) -> anyhow::Result<()> {
    if config.mcp.servers.is_empty() {
        println!("No tool servers configured.");
        return Ok(());
    }

    let provider = McpAgentProvider::new(
        "MCP",
        "Default",
        config.mcp.servers.clone(),
        config.mcp.tools.clone(),
    );
    let mut agent = provider.agent_clients(&DefaultConnector).await?;

    for tool in &agent.tools {
        match &tool.function.description {
            Some(description) => println!("{}\t{}", tool.name(), description),
            None => println!("{}", tool.name()),
        }
    }
    println!();
    println!(
        "{} tools from {} connected servers",
        agent.tools.len(),
        agent.clients.len()
    );

    agent.close_all().await;
    Ok(())
}
