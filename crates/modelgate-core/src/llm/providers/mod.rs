//! Provider adapters
//!
//! Every provider answers the same call: take a question, write the answer
//! to an [`EventSink`], and report token usage as a [`ModelResult`].

mod factory;
mod hunyuan;
mod ollama;
mod openai_compatible;
mod tencentcloud;

#[cfg(test)]
mod openai_compatible_tests;

pub use factory::ProviderFactory;
pub use hunyuan::{
    HUNYUAN_ENDPOINT, HunyuanApi, HunyuanApiError, HunyuanBackend, HunyuanChatRequest,
    HunyuanChatResponse, HunyuanChoice, HunyuanClient, HunyuanMessage, HunyuanReply,
};
pub use ollama::{OLLAMA_PRICING, OllamaProvider};
pub use openai_compatible::OpenAiCompatibleProvider;
pub use tencentcloud::{TENCENTCLOUD_PRICING, TencentCloudProvider};

#[cfg(test)]
pub use hunyuan::MockHunyuanApi;

use crate::error::GateResult;
use crate::llm::messages::ChatMessage;
use crate::llm::sink::EventSink;
use crate::types::ModelResult;
use async_trait::async_trait;

/// Uniform contract of a chat provider
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Human-readable pricing note
    fn pricing(&self) -> &'static str;

    /// Answer `question`, writing output to `sink`
    ///
    /// `history`, `prompt` and `knowledge` are part of the contract but the
    /// current adapters send a single user turn.
    async fn query_text(
        &self,
        question: &str,
        sink: &mut dyn EventSink,
        history: &[ChatMessage],
        prompt: &str,
        knowledge: &[ChatMessage],
    ) -> GateResult<ModelResult>;
}

/// Closed set of configured providers
pub enum ProviderInstance {
    OpenAi(OpenAiCompatibleProvider),
    Ollama(OllamaProvider),
    TencentCloud(TencentCloudProvider),
}

#[async_trait]
impl ModelProvider for ProviderInstance {
    fn pricing(&self) -> &'static str {
        match self {
            Self::OpenAi(p) => p.pricing(),
            Self::Ollama(p) => p.pricing(),
            Self::TencentCloud(p) => p.pricing(),
        }
    }

    async fn query_text(
        &self,
        question: &str,
        sink: &mut dyn EventSink,
        history: &[ChatMessage],
        prompt: &str,
        knowledge: &[ChatMessage],
    ) -> GateResult<ModelResult> {
        match self {
            Self::OpenAi(p) => p.query_text(question, sink, history, prompt, knowledge).await,
            Self::Ollama(p) => p.query_text(question, sink, history, prompt, knowledge).await,
            Self::TencentCloud(p) => {
                p.query_text(question, sink, history, prompt, knowledge)
                    .await
            }
        }
    }
}
