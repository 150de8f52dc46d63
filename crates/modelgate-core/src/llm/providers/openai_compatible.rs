//! OpenAI-compatible streaming chat provider

use super::ModelProvider;
use crate::error::{GateError, GateResult};
use crate::llm::admission::{admit, is_dry_run, max_tokens_for_model};
use crate::llm::messages::ChatMessage;
use crate::llm::relay::relay_stream;
use crate::llm::request::{ChatRequest, SamplingParams};
use crate::llm::sink::EventSink;
use crate::llm::streaming::{CompletionStream, openai_sse_stream};
use crate::llm::tokenizer::{TokenEstimator, default_estimator};
use crate::types::ModelResult;
use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

/// Default public OpenAI endpoint
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const OPENAI_PRICING: &str = "URL:\nhttps://openai.com/api/pricing/\n";

/// Streams chat completions from any server speaking the OpenAI protocol
pub struct OpenAiCompatibleProvider {
    base_url: String,
    api_key: Option<String>,
    model: String,
    sampling: SamplingParams,
    max_tokens: usize,
    http_client: Client,
    estimator: &'static dyn TokenEstimator,
}

impl OpenAiCompatibleProvider {
    /// Create a provider for `model` at `base_url`
    ///
    /// The admission budget defaults to the built-in context size of `model`.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        http_client: Client,
    ) -> GateResult<Self> {
        let model = model.into();
        Ok(Self {
            base_url: base_url.into(),
            api_key: None,
            max_tokens: max_tokens_for_model(&model),
            model,
            sampling: SamplingParams::default(),
            http_client,
            estimator: default_estimator()?,
        })
    }

    /// Bearer key; blank keys are not sent
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_estimator(mut self, estimator: &'static dyn TokenEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    async fn open_stream(&self, request: &ChatRequest) -> GateResult<CompletionStream> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        tracing::debug!(%url, model = %request.model, "opening chat completion stream");

        let mut builder = self.http_client.post(&url).json(request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.map_err(|e| {
            GateError::from(e).attach_context("Opening chat completion stream")
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "chat completion request rejected");
            return Err(GateError::http_status(
                format!("Chat completion request failed (status {}): {}", status, body),
                status.as_u16(),
            ));
        }

        Ok(openai_sse_stream(response.bytes_stream()))
    }
}

#[async_trait]
impl ModelProvider for OpenAiCompatibleProvider {
    fn pricing(&self) -> &'static str {
        OPENAI_PRICING
    }

    #[instrument(skip_all, fields(model = %self.model), level = "debug")]
    async fn query_text(
        &self,
        question: &str,
        sink: &mut dyn EventSink,
        _history: &[ChatMessage],
        _prompt: &str,
        _knowledge: &[ChatMessage],
    ) -> GateResult<ModelResult> {
        let request = ChatRequest::single_turn(question, &self.model, &self.sampling);
        let prompt_tokens = self.estimator.count_messages(&request.messages);

        if is_dry_run(question) {
            tracing::debug!(prompt_tokens, max_tokens = self.max_tokens, "dry run");
            return admit(prompt_tokens, self.max_tokens);
        }

        let stream = self.open_stream(&request).await?;
        relay_stream(
            stream,
            sink,
            self.estimator,
            ModelResult::with_prompt_tokens(prompt_tokens),
        )
        .await
    }
}
