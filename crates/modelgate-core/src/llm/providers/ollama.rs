//! Ollama chat provider

use super::ModelProvider;
use super::openai_compatible::OpenAiCompatibleProvider;
use crate::config::ProviderSettings;
use crate::error::GateResult;
use crate::llm::messages::ChatMessage;
use crate::llm::sink::EventSink;
use crate::types::ModelResult;
use async_trait::async_trait;

pub const OLLAMA_PRICING: &str = "URL:\nhttps://ollama.com/search\n\nNot charged\n";

/// Base URL used when no endpoint is configured
pub const OLLAMA_DEFAULT_ENDPOINT: &str = "http://localhost:11434/v1";

/// Ollama served through its OpenAI-compatible API
///
/// The configured `sub_type` is the model name and the endpoint is the base
/// URL; everything else is the local OpenAI-compatible behaviour.
pub struct OllamaProvider {
    local: OpenAiCompatibleProvider,
}

impl OllamaProvider {
    pub fn new(settings: &ProviderSettings) -> GateResult<Self> {
        let endpoint = if settings.endpoint.trim().is_empty() {
            OLLAMA_DEFAULT_ENDPOINT
        } else {
            settings.endpoint.as_str()
        };

        let mut local = OpenAiCompatibleProvider::new(
            endpoint,
            settings.sub_type.as_str(),
            settings.timeouts.build_http_client()?,
        )?
        .with_api_key(settings.secret_key.clone())
        .with_sampling(settings.sampling());
        if let Some(max_tokens) = settings.max_tokens {
            local = local.with_max_tokens(max_tokens);
        }

        Ok(Self { local })
    }

    pub fn inner(&self) -> &OpenAiCompatibleProvider {
        &self.local
    }
}

#[async_trait]
impl ModelProvider for OllamaProvider {
    fn pricing(&self) -> &'static str {
        OLLAMA_PRICING
    }

    async fn query_text(
        &self,
        question: &str,
        sink: &mut dyn EventSink,
        history: &[ChatMessage],
        prompt: &str,
        knowledge: &[ChatMessage],
    ) -> GateResult<ModelResult> {
        self.local
            .query_text(question, sink, history, prompt, knowledge)
            .await
    }
}
