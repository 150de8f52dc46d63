//! Hunyuan chat API (non-streaming)
//!
//! Requests are signed with TC3-HMAC-SHA256 and sent as a single
//! `ChatCompletions` call; the answer is written to the sink in one piece.

use crate::error::{GateError, GateResult};
use crate::llm::admission::{dry_run, is_dry_run, max_tokens_for_model};
use crate::llm::messages::ChatMessage;
use crate::llm::relay::relay_full_text;
use crate::llm::sink::EventSink;
use crate::llm::tokenizer::{TokenEstimator, default_estimator};
use crate::types::ModelResult;
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::instrument;

/// Public Hunyuan API host
pub const HUNYUAN_ENDPOINT: &str = "hunyuan.tencentcloudapi.com";

const SERVICE: &str = "hunyuan";
const ACTION: &str = "ChatCompletions";
const API_VERSION: &str = "2023-09-01";
const ALGORITHM: &str = "TC3-HMAC-SHA256";
const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HunyuanMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HunyuanChatRequest {
    pub model: String,
    pub messages: Vec<HunyuanMessage>,
    pub stream: bool,
}

impl HunyuanChatRequest {
    /// One user message, non-streaming
    pub fn single_turn(model: &str, question: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![HunyuanMessage {
                role: "user".to_string(),
                content: question.to_string(),
            }],
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HunyuanReply {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HunyuanChoice {
    #[serde(default)]
    pub message: HunyuanReply,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Error object reported by the API in place of choices
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HunyuanApiError {
    pub code: String,
    pub message: String,
}

/// Body of the `Response` envelope
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HunyuanChatResponse {
    #[serde(default)]
    pub choices: Vec<HunyuanChoice>,
    #[serde(default)]
    pub error: Option<HunyuanApiError>,
    #[serde(default)]
    pub request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(rename = "Response", default)]
    response: Option<HunyuanChatResponse>,
}

/// Transport seam for the Hunyuan API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HunyuanApi: Send + Sync {
    async fn chat_completions(&self, request: &HunyuanChatRequest)
    -> GateResult<HunyuanChatResponse>;
}

/// Signed HTTP client for the Hunyuan API
pub struct HunyuanClient {
    secret_id: String,
    secret_key: String,
    base_url: String,
    region: Option<String>,
    http_client: Client,
}

impl HunyuanClient {
    pub fn new(
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        http_client: Client,
    ) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            base_url: format!("https://{}", HUNYUAN_ENDPOINT),
            region: None,
            http_client,
        }
    }

    /// Send requests to a different base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into()).filter(|r| !r.is_empty());
        self
    }

    fn host(&self) -> GateResult<String> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| GateError::config(format!("Invalid Hunyuan base URL: {}", e)))?;
        let host = url
            .host_str()
            .ok_or_else(|| GateError::config("Hunyuan base URL has no host"))?;
        Ok(match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }
}

fn hmac_sha256(key: &[u8], data: &str) -> GateResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| GateError::other(format!("HMAC key rejected: {}", e)))?;
    mac.update(data.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

fn sha256_hex(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

/// Build the TC3-HMAC-SHA256 `Authorization` header value
pub(crate) fn tc3_authorization(
    secret_id: &str,
    secret_key: &str,
    host: &str,
    payload: &str,
    timestamp: i64,
) -> GateResult<String> {
    let date = chrono::DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| GateError::invalid_input(format!("Invalid timestamp {}", timestamp)))?
        .format("%Y-%m-%d")
        .to_string();

    let canonical_headers = format!(
        "content-type:{}\nhost:{}\nx-tc-action:{}\n",
        CONTENT_TYPE,
        host,
        ACTION.to_lowercase()
    );
    let canonical_request = format!(
        "POST\n/\n\n{}\n{}\n{}",
        canonical_headers,
        SIGNED_HEADERS,
        sha256_hex(payload)
    );

    let credential_scope = format!("{}/{}/tc3_request", date, SERVICE);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        timestamp,
        credential_scope,
        sha256_hex(&canonical_request)
    );

    let secret_date = hmac_sha256(format!("TC3{}", secret_key).as_bytes(), &date)?;
    let secret_service = hmac_sha256(&secret_date, SERVICE)?;
    let secret_signing = hmac_sha256(&secret_service, "tc3_request")?;
    let signature = hex::encode(hmac_sha256(&secret_signing, &string_to_sign)?);

    Ok(format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, secret_id, credential_scope, SIGNED_HEADERS, signature
    ))
}

#[async_trait]
impl HunyuanApi for HunyuanClient {
    #[instrument(skip_all, fields(model = %request.model), level = "debug")]
    async fn chat_completions(
        &self,
        request: &HunyuanChatRequest,
    ) -> GateResult<HunyuanChatResponse> {
        let payload = serde_json::to_string(request)?;
        let host = self.host()?;
        let timestamp = chrono::Utc::now().timestamp();
        let authorization =
            tc3_authorization(&self.secret_id, &self.secret_key, &host, &payload, timestamp)?;

        let mut builder = self
            .http_client
            .post(&self.base_url)
            .header("Authorization", authorization)
            .header("Content-Type", CONTENT_TYPE)
            .header("Host", host)
            .header("X-TC-Action", ACTION)
            .header("X-TC-Timestamp", timestamp.to_string())
            .header("X-TC-Version", API_VERSION);
        if let Some(region) = &self.region {
            builder = builder.header("X-TC-Region", region);
        }

        let response = builder
            .body(payload)
            .send()
            .await
            .map_err(|e| GateError::from(e).attach_context("failed to execute request"))?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GateError::http_status(
                format!("Hunyuan API returned status {}: {}", status, body),
                status.as_u16(),
            ));
        }

        let envelope: ResponseEnvelope = serde_json::from_str(&body)
            .map_err(|e| GateError::protocol(format!("Malformed Hunyuan response: {}", e)))?;
        Ok(envelope.response.unwrap_or_default())
    }
}

/// Non-streaming Hunyuan provider path
pub struct HunyuanBackend {
    api: Box<dyn HunyuanApi>,
    model: String,
    max_tokens: usize,
    estimator: &'static dyn TokenEstimator,
}

impl HunyuanBackend {
    pub fn new(api: Box<dyn HunyuanApi>, model: impl Into<String>) -> GateResult<Self> {
        let model = model.into();
        Ok(Self {
            api,
            max_tokens: max_tokens_for_model(&model),
            model,
            estimator: default_estimator()?,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_estimator(mut self, estimator: &'static dyn TokenEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    #[instrument(skip_all, fields(model = %self.model), level = "debug")]
    pub async fn query_text(
        &self,
        question: &str,
        sink: &mut dyn EventSink,
    ) -> GateResult<ModelResult> {
        if is_dry_run(question) {
            return dry_run(
                &[ChatMessage::user(question)],
                self.estimator,
                self.max_tokens,
            );
        }

        let request = HunyuanChatRequest::single_turn(&self.model, question);
        let response = self.api.chat_completions(&request).await?;

        if let Some(error) = response.error {
            return Err(GateError::llm_with_provider(
                format!("TencentCloud SDK error: [{}] {}", error.code, error.message),
                "tencentcloud",
            ));
        }

        let choice = response
            .choices
            .first()
            .ok_or_else(|| GateError::protocol("unexpected empty response"))?;
        let text = choice.message.content.trim();

        let result = ModelResult::with_prompt_tokens(self.estimator.count_text(question));
        relay_full_text(text, sink, self.estimator, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::sink::BufferSink;
    use crate::llm::tokenizer::testing::WordEstimator;
    use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reply(content: &str) -> HunyuanChatResponse {
        HunyuanChatResponse {
            choices: vec![HunyuanChoice {
                message: HunyuanReply {
                    role: Some("assistant".to_string()),
                    content: content.to_string(),
                },
                finish_reason: Some("stop".to_string()),
            }],
            ..Default::default()
        }
    }

    fn backend(api: MockHunyuanApi) -> HunyuanBackend {
        HunyuanBackend::new(Box::new(api), "hunyuan-lite")
            .unwrap()
            .with_estimator(&WordEstimator)
    }

    #[tokio::test]
    async fn test_trims_and_writes_once() {
        let mut api = MockHunyuanApi::new();
        api.expect_chat_completions()
            .withf(|request| {
                request.model == "hunyuan-lite"
                    && request.messages.len() == 1
                    && request.messages[0].role == "user"
                    && request.messages[0].content == "two words"
                    && !request.stream
            })
            .times(1)
            .returning(|_| Ok(reply("  the answer is here \n")));

        let mut sink = BufferSink::new();
        let result = backend(api).query_text("two words", &mut sink).await.unwrap();

        assert_eq!(sink.contents(), "the answer is here");
        assert_eq!(sink.write_count(), 1);
        assert_eq!(result.prompt_token_count(), 2);
        assert_eq!(result.response_token_count(), 4);
        assert_eq!(result.total_token_count(), 6);
    }

    #[tokio::test]
    async fn test_api_error_is_sdk_error() {
        let mut api = MockHunyuanApi::new();
        api.expect_chat_completions().returning(|_| {
            Ok(HunyuanChatResponse {
                error: Some(HunyuanApiError {
                    code: "AuthFailure.SignatureFailure".to_string(),
                    message: "signature mismatch".to_string(),
                }),
                ..Default::default()
            })
        });

        let mut sink = BufferSink::new();
        let err = backend(api).query_text("q", &mut sink).await.unwrap_err();
        assert!(matches!(err, GateError::Llm { .. }));
        assert!(err.to_string().contains("TencentCloud SDK error"));
        assert_eq!(sink.write_count(), 0);
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_response() {
        let mut api = MockHunyuanApi::new();
        api.expect_chat_completions()
            .returning(|_| Ok(HunyuanChatResponse::default()));

        let mut sink = BufferSink::new();
        let err = backend(api).query_text("q", &mut sink).await.unwrap_err();
        assert!(matches!(err, GateError::Protocol { .. }));
        assert!(err.to_string().contains("unexpected empty response"));
        assert_eq!(sink.write_count(), 0);
    }

    #[tokio::test]
    async fn test_dry_run_skips_api() {
        let mut api = MockHunyuanApi::new();
        api.expect_chat_completions().times(0);

        let mut sink = BufferSink::new();
        let result = backend(api)
            .with_max_tokens(100)
            .query_text("$CasibaseDryRun$ short", &mut sink)
            .await
            .unwrap();
        assert_eq!(result.response_token_count(), 0);
        assert_eq!(sink.write_count(), 0);

        let mut api = MockHunyuanApi::new();
        api.expect_chat_completions().times(0);
        let err = backend(api)
            .with_max_tokens(5)
            .query_text("$CasibaseDryRun$ short", &mut sink)
            .await
            .unwrap_err();
        assert!(matches!(err, GateError::AdmissionRejected { .. }));
    }

    #[test]
    fn test_signature_is_deterministic() {
        let payload = r#"{"Model":"hunyuan-lite","Messages":[],"Stream":false}"#;
        let first =
            tc3_authorization("AKIDEXAMPLE", "secret", HUNYUAN_ENDPOINT, payload, 1_700_000_000)
                .unwrap();
        let second =
            tc3_authorization("AKIDEXAMPLE", "secret", HUNYUAN_ENDPOINT, payload, 1_700_000_000)
                .unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with(
            "TC3-HMAC-SHA256 Credential=AKIDEXAMPLE/2023-11-14/hunyuan/tc3_request, \
             SignedHeaders=content-type;host;x-tc-action, Signature="
        ));
        let signature = first.rsplit('=').next().unwrap();
        assert_eq!(signature.len(), 64);

        let other_key =
            tc3_authorization("AKIDEXAMPLE", "other", HUNYUAN_ENDPOINT, payload, 1_700_000_000)
                .unwrap();
        assert_ne!(first, other_key);
    }

    #[test]
    fn test_request_wire_shape() {
        let json = serde_json::to_value(HunyuanChatRequest::single_turn("hunyuan-pro", "hi")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Model": "hunyuan-pro",
                "Messages": [{"Role": "user", "Content": "hi"}],
                "Stream": false
            })
        );
    }

    #[tokio::test]
    async fn test_client_sends_signed_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("X-TC-Action", "ChatCompletions"))
            .and(header("X-TC-Version", "2023-09-01"))
            .and(header_exists("X-TC-Timestamp"))
            .and(header_exists("Authorization"))
            .and(body_partial_json(serde_json::json!({"Model": "hunyuan-lite"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": {
                    "RequestId": "req-1",
                    "Choices": [{"Message": {"Role": "assistant", "Content": "pong"}, "FinishReason": "stop"}]
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = HunyuanClient::new("id", "key", Client::new()).with_base_url(mock_server.uri());
        let response = client
            .chat_completions(&HunyuanChatRequest::single_turn("hunyuan-lite", "ping"))
            .await
            .unwrap();

        assert_eq!(response.request_id.as_deref(), Some("req-1"));
        assert_eq!(response.choices[0].message.content, "pong");
    }

    #[tokio::test]
    async fn test_client_surfaces_api_error_object() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": {
                    "Error": {"Code": "AuthFailure", "Message": "bad key"},
                    "RequestId": "req-2"
                }
            })))
            .mount(&mock_server)
            .await;

        let client = HunyuanClient::new("id", "key", Client::new()).with_base_url(mock_server.uri());
        let response = client
            .chat_completions(&HunyuanChatRequest::single_turn("hunyuan-lite", "ping"))
            .await
            .unwrap();

        assert!(response.choices.is_empty());
        assert_eq!(response.error.unwrap().code, "AuthFailure");
    }
}
