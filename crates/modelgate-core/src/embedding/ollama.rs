//! Ollama embeddings through the OpenAI-compatible endpoint

use super::{EmbeddingProvider, EmbeddingResult};
use crate::error::{GateError, GateResult};
use crate::llm::providers::OLLAMA_PRICING;
use crate::llm::tokenizer::{TokenEstimator, default_estimator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingData>,
    #[serde(default)]
    usage: Option<EmbeddingUsage>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingUsage {
    #[serde(default)]
    prompt_tokens: usize,
}

pub struct OllamaEmbeddingProvider {
    sub_type: String,
    secret_key: Option<String>,
    provider_url: String,
    http_client: Client,
    estimator: &'static dyn TokenEstimator,
}

impl OllamaEmbeddingProvider {
    pub fn new(
        sub_type: impl Into<String>,
        secret_key: Option<String>,
        provider_url: impl Into<String>,
        http_client: Client,
    ) -> GateResult<Self> {
        Ok(Self {
            sub_type: sub_type.into(),
            secret_key: secret_key.filter(|k| !k.trim().is_empty()),
            provider_url: provider_url.into(),
            http_client,
            estimator: default_estimator()?,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    fn pricing(&self) -> &'static str {
        OLLAMA_PRICING
    }

    #[instrument(skip_all, fields(model = %self.sub_type), level = "debug")]
    async fn query_vector(&self, text: &str) -> GateResult<(Vec<f32>, EmbeddingResult)> {
        let url = format!("{}/v1/embeddings", self.provider_url.trim_end_matches('/'));
        let mut builder = self.http_client.post(&url).json(&EmbeddingRequest {
            model: &self.sub_type,
            input: text,
        });
        if let Some(key) = &self.secret_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GateError::from(e).attach_context("Requesting embedding"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GateError::http_status(
                format!("Embedding request failed (status {}): {}", status, body),
                status.as_u16(),
            ));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| GateError::protocol(format!("Malformed embedding response: {}", e)))?;

        let token_count = match parsed.usage {
            Some(usage) if usage.prompt_tokens > 0 => usage.prompt_tokens,
            _ => self.estimator.count_text(text),
        };
        let vector = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| GateError::protocol("Embedding response contains no data"))?;

        tracing::debug!(dimensions = vector.len(), token_count, "embedding received");
        Ok((vector, EmbeddingResult::free(token_count)))
    }
}
