//! Connection handles to tool servers

use async_trait::async_trait;
use modelgate_core::config::McpServerConfig;
use modelgate_core::error::{GateError, GateResult};
use std::collections::HashMap;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::debug;

/// An open connection to one tool server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolClient: Send + Sync {
    fn server_name(&self) -> &str;

    /// Release the connection
    async fn close(&mut self) -> GateResult<()>;
}

/// Opens tool-server connections from configuration
#[async_trait]
pub trait ClientConnector: Send + Sync {
    async fn connect(&self, name: &str, config: &McpServerConfig) -> GateResult<Box<dyn ToolClient>>;
}

/// Tool server running as a child process speaking over stdio
pub struct StdioToolClient {
    name: String,
    child: Option<Child>,
}

impl StdioToolClient {
    pub fn spawn(
        name: &str,
        command: &str,
        args: &[String],
        env: &HashMap<String, String>,
    ) -> GateResult<Self> {
        let child = Command::new(command)
            .args(args)
            .envs(env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| GateError::tool(name, format!("Failed to spawn '{}': {}", command, e)))?;

        debug!(server = name, command, pid = ?child.id(), "spawned tool server");
        Ok(Self {
            name: name.to_string(),
            child: Some(child),
        })
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }
}

#[async_trait]
impl ToolClient for StdioToolClient {
    fn server_name(&self) -> &str {
        &self.name
    }

    async fn close(&mut self) -> GateResult<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        // A child that already exited cannot be killed.
        if child.try_wait()?.is_none() {
            child
                .kill()
                .await
                .map_err(|e| GateError::tool(&self.name, format!("Failed to stop server: {}", e)))?;
        }
        debug!(server = %self.name, "closed tool server");
        Ok(())
    }
}

/// Tool server reached over HTTP
///
/// A placeholder endpoint record: it keeps the URL and headers but opens no
/// connection, so closing it only marks it closed.
pub struct HttpToolClient {
    name: String,
    endpoint: reqwest::Url,
    headers: HashMap<String, String>,
    open: bool,
}

impl HttpToolClient {
    pub fn new(name: &str, url: &str, headers: HashMap<String, String>) -> GateResult<Self> {
        let endpoint = reqwest::Url::parse(url)
            .map_err(|e| GateError::tool(name, format!("Invalid server URL '{}': {}", url, e)))?;
        Ok(Self {
            name: name.to_string(),
            endpoint,
            headers,
            open: true,
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[async_trait]
impl ToolClient for HttpToolClient {
    fn server_name(&self) -> &str {
        &self.name
    }

    /// Marks the record closed; there is no connection to release
    async fn close(&mut self) -> GateResult<()> {
        self.open = false;
        Ok(())
    }
}

/// Connects stdio servers by `command` and remote servers by `url`
#[derive(Debug, Default)]
pub struct DefaultConnector;

#[async_trait]
impl ClientConnector for DefaultConnector {
    async fn connect(&self, name: &str, config: &McpServerConfig) -> GateResult<Box<dyn ToolClient>> {
        if let Some(command) = &config.command {
            return Ok(Box::new(StdioToolClient::spawn(
                name,
                command,
                &config.args,
                &config.env,
            )?));
        }
        if let Some(url) = &config.url {
            return Ok(Box::new(HttpToolClient::new(name, url, config.headers.clone())?));
        }
        Err(GateError::tool(name, "server needs either a command or a url"))
    }
}
