//! Tencent Cloud provider
//!
//! The call path is fixed when the provider is built: the Hunyuan API
//! endpoint (or no endpoint at all) selects the signed, non-streaming
//! Hunyuan backend; any other endpoint is treated as an OpenAI-compatible
//! gateway whose last path segment names the model.

use super::ModelProvider;
use super::hunyuan::{HUNYUAN_ENDPOINT, HunyuanBackend, HunyuanClient};
use super::openai_compatible::OpenAiCompatibleProvider;
use crate::config::ProviderSettings;
use crate::error::{GateError, GateResult};
use crate::llm::admission::max_tokens_for_model;
use crate::llm::messages::ChatMessage;
use crate::llm::request::model_from_endpoint;
use crate::llm::sink::EventSink;
use crate::types::ModelResult;
use async_trait::async_trait;

pub const TENCENTCLOUD_PRICING: &str =
    "Pricing information for Tencent Cloud models is not yet available.";

pub enum TencentCloudProvider {
    /// Signed calls to the Hunyuan API
    SdkBacked(HunyuanBackend),
    /// Streaming calls to an OpenAI-compatible gateway
    OpenAiCompatible(OpenAiCompatibleProvider),
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

impl TencentCloudProvider {
    pub fn new(settings: &ProviderSettings) -> GateResult<Self> {
        let endpoint = settings.endpoint.trim();
        let max_tokens = settings
            .max_tokens
            .unwrap_or_else(|| max_tokens_for_model(&settings.sub_type));
        let http_client = settings.timeouts.build_http_client()?;

        if endpoint.is_empty() || settings.endpoint == HUNYUAN_ENDPOINT {
            if is_blank(settings.secret_id.as_deref()) || is_blank(settings.secret_key.as_deref())
            {
                return Err(GateError::config(
                    "invalid credentials: secret_id and secret_key cannot be empty",
                ));
            }
            let client = HunyuanClient::new(
                settings.secret_id.clone().unwrap_or_default(),
                settings.secret_key.clone().unwrap_or_default(),
                http_client,
            );
            tracing::debug!(model = %settings.sub_type, "using signed Hunyuan API");
            let backend = HunyuanBackend::new(Box::new(client), settings.sub_type.as_str())?
                .with_max_tokens(max_tokens);
            return Ok(Self::SdkBacked(backend));
        }

        let model = model_from_endpoint(&settings.endpoint);
        tracing::debug!(%model, endpoint = %settings.endpoint, "using OpenAI-compatible gateway");
        let provider = OpenAiCompatibleProvider::new(settings.endpoint.as_str(), model, http_client)?
            .with_api_key(settings.secret_key.clone())
            .with_sampling(settings.sampling())
            .with_max_tokens(max_tokens);
        Ok(Self::OpenAiCompatible(provider))
    }

    pub fn is_sdk_backed(&self) -> bool {
        matches!(self, Self::SdkBacked(_))
    }
}

#[async_trait]
impl ModelProvider for TencentCloudProvider {
    fn pricing(&self) -> &'static str {
        TENCENTCLOUD_PRICING
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
            Self::SdkBacked(backend) => backend.query_text(question, sink).await,
            Self::OpenAiCompatible(provider) => {
                provider
                    .query_text(question, sink, history, prompt, knowledge)
                    .await
            }
        }
    }
}
