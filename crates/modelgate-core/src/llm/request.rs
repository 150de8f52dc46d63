//! Chat request assembly

use super::messages::ChatMessage;
use serde::Serialize;

/// Sampling parameters forwarded to the provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 1.0,
        }
    }
}

/// OpenAI-compatible chat completion request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub top_p: f32,
    pub stream: bool,
}

impl ChatRequest {
    /// Build a streaming request carrying exactly one user message
    pub fn single_turn(question: &str, model: &str, sampling: &SamplingParams) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage::user(question)],
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            stream: true,
        }
    }
}

/// Derive a model name from the last `/`-separated segment of an endpoint
///
/// `https://gateway.example.com/v1/hunyuan-lite` yields `hunyuan-lite`. An
/// endpoint ending in `/` yields an empty model name, which is passed through
/// to the provider unchanged.
pub fn model_from_endpoint(endpoint: &str) -> String {
    let model = endpoint.rsplit('/').next().unwrap_or_default();
    if model.is_empty() {
        tracing::warn!(endpoint, "endpoint has no trailing path segment, model name is empty");
    }
    model.to_string()
}
