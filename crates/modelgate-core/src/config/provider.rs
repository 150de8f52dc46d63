//! Provider and embedding settings

use super::timeouts::TimeoutConfig;
use crate::error::{GateError, GateResult};
use crate::llm::request::SamplingParams;
use serde::{Deserialize, Serialize};

fn default_temperature() -> f32 {
    1.0
}

fn default_top_p() -> f32 {
    1.0
}

/// Kind of chat provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Any OpenAI-compatible streaming endpoint
    #[serde(rename = "openai", alias = "OpenAI")]
    OpenAi,
    /// Ollama or another local OpenAI-compatible server
    #[serde(rename = "ollama", alias = "Ollama")]
    Ollama,
    /// Tencent Cloud: Hunyuan API or an OpenAI-compatible gateway
    #[serde(rename = "tencentcloud", alias = "Tencent Cloud")]
    TencentCloud,
}

impl ProviderKind {
    /// Parse provider kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "ollama" | "local" => Some(Self::Ollama),
            "tencentcloud" | "tencent cloud" | "hunyuan" => Some(Self::TencentCloud),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
            Self::TencentCloud => "tencentcloud",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for one configured chat provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    /// Model name as understood by the provider
    #[serde(default)]
    pub sub_type: String,
    /// Endpoint or base URL
    #[serde(default)]
    pub endpoint: String,
    /// Secret id (Hunyuan API signing only)
    #[serde(default)]
    pub secret_id: Option<String>,
    /// Secret key or bearer API key
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Overrides the built-in context size used by dry-run admission
    #[serde(default)]
    pub max_tokens: Option<usize>,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl ProviderSettings {
    /// Create settings for a provider kind with default sampling
    pub fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            sub_type: String::new(),
            endpoint: String::new(),
            secret_id: None,
            secret_key: None,
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: None,
            timeouts: TimeoutConfig::default(),
        }
    }

    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = sub_type.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_secret_id(mut self, secret_id: impl Into<String>) -> Self {
        self.secret_id = Some(secret_id.into());
        self
    }

    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_sampling(mut self, temperature: f32, top_p: f32) -> Self {
        self.temperature = temperature;
        self.top_p = top_p;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn sampling(&self) -> SamplingParams {
        SamplingParams {
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }

    /// Validate sampling and timeout values
    pub fn validate(&self, name: &str) -> GateResult<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(GateError::invalid_input_field(
                format!("temperature {} of provider '{}' must be within [0, 2]", self.temperature, name),
                "temperature",
            ));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(GateError::invalid_input_field(
                format!("top_p {} of provider '{}' must be within (0, 1]", self.top_p, name),
                "top_p",
            ));
        }
        self.timeouts.validate()
    }
}

/// Kind of embedding provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbeddingKind {
    #[serde(rename = "ollama", alias = "Ollama")]
    Ollama,
}

/// Settings for the embedding provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    pub kind: EmbeddingKind,
    /// Embedding model name
    pub sub_type: String,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Base URL of the embedding server
    pub provider_url: String,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}
