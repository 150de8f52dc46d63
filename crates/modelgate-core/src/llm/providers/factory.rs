//! Provider construction from configuration

use super::ProviderInstance;
use super::ollama::OllamaProvider;
use super::openai_compatible::{OPENAI_BASE_URL, OpenAiCompatibleProvider};
use super::tencentcloud::TencentCloudProvider;
use crate::config::{ProviderKind, ProviderSettings};
use crate::error::GateResult;

/// Builds provider instances from settings
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create(settings: &ProviderSettings) -> GateResult<ProviderInstance> {
        tracing::debug!(kind = %settings.kind, model = %settings.sub_type, "creating provider");
        match settings.kind {
            ProviderKind::OpenAi => {
                let base_url = if settings.endpoint.trim().is_empty() {
                    OPENAI_BASE_URL
                } else {
                    settings.endpoint.as_str()
                };
                let mut provider = OpenAiCompatibleProvider::new(
                    base_url,
                    settings.sub_type.as_str(),
                    settings.timeouts.build_http_client()?,
                )?
                .with_api_key(settings.secret_key.clone())
                .with_sampling(settings.sampling());
                if let Some(max_tokens) = settings.max_tokens {
                    provider = provider.with_max_tokens(max_tokens);
                }
                Ok(ProviderInstance::OpenAi(provider))
            }
            ProviderKind::Ollama => Ok(ProviderInstance::Ollama(OllamaProvider::new(settings)?)),
            ProviderKind::TencentCloud => Ok(ProviderInstance::TencentCloud(
                TencentCloudProvider::new(settings)?,
            )),
        }
    }
}
