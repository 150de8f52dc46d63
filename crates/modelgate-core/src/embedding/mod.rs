//! Embedding providers

mod ollama;

pub use ollama::OllamaEmbeddingProvider;

use crate::config::{EmbeddingKind, EmbeddingSettings};
use crate::error::GateResult;
use async_trait::async_trait;
use serde::Serialize;

/// Usage and cost of one embedding call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingResult {
    pub token_count: usize,
    pub price: f64,
    pub currency: String,
}

impl EmbeddingResult {
    /// Result for a provider that does not charge
    pub fn free(token_count: usize) -> Self {
        Self {
            token_count,
            price: 0.0,
            currency: "USD".to_string(),
        }
    }
}

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn pricing(&self) -> &'static str;

    /// Embed `text` and report usage
    async fn query_vector(&self, text: &str) -> GateResult<(Vec<f32>, EmbeddingResult)>;
}

/// Build the configured embedding provider
pub fn create_embedding_provider(
    settings: &EmbeddingSettings,
) -> GateResult<Box<dyn EmbeddingProvider>> {
    match settings.kind {
        EmbeddingKind::Ollama => Ok(Box::new(OllamaEmbeddingProvider::new(
            settings.sub_type.as_str(),
            settings.secret_key.clone(),
            settings.provider_url.as_str(),
            settings.timeouts.build_http_client()?,
        )?)),
    }
}
