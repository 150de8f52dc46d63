//! Mock-server tests for the OpenAI-compatible provider

use super::{ModelProvider, OpenAiCompatibleProvider};
use crate::error::GateError;
use crate::llm::request::SamplingParams;
use crate::llm::sink::BufferSink;
use crate::llm::tokenizer::{TokenEstimator, default_estimator};
use crate::types::ModelResult;
use reqwest::Client;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_provider(base_url: &str) -> OpenAiCompatibleProvider {
    let http_client = Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to create HTTP client");
    OpenAiCompatibleProvider::new(base_url, "gpt-3.5-turbo", http_client)
        .unwrap()
        .with_api_key(Some("test-api-key".to_string()))
        .with_sampling(SamplingParams {
            temperature: 0.5,
            top_p: 0.8,
        })
}

fn sse_body(deltas: &[&str]) -> String {
    let mut body = String::new();
    body.push_str("data: {\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\",\"content\":\"\"}}]}\n\n");
    for delta in deltas {
        let chunk = serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion.chunk",
            "choices": [{"index": 0, "delta": {"content": delta}, "finish_reason": null}]
        });
        body.push_str(&format!("data: {}\n\n", chunk));
    }
    body.push_str("data: {\"choices\":[]}\n\n");
    body.push_str("data: [DONE]\n\n");
    body
}

fn expected_prompt_tokens(question: &str) -> usize {
    let estimator = default_estimator().unwrap();
    estimator.count_messages(&[crate::llm::messages::ChatMessage::user(question)])
}

#[tokio::test]
async fn test_stream_relays_frames_and_counts_tokens() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-api-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-3.5-turbo",
            "stream": true,
            "messages": [{"role": "user", "content": "Say hello"}]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse_body(&["Hel", "lo", " world"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server.uri());
    let mut sink = BufferSink::new();
    let result = provider
        .query_text("Say hello", &mut sink, &[], "", &[])
        .await
        .unwrap();

    assert_eq!(
        sink.contents(),
        "event: message\ndata: \n\n\
         event: message\ndata: Hel\n\n\
         event: message\ndata: lo\n\n\
         event: message\ndata:  world\n\n"
    );

    let estimator = default_estimator().unwrap();
    let response_tokens: usize = ["Hel", "lo", " world"]
        .iter()
        .map(|d| estimator.count_text(d))
        .sum();
    assert_eq!(result.prompt_token_count(), expected_prompt_tokens("Say hello"));
    assert_eq!(result.response_token_count(), response_tokens);
    assert_eq!(
        result.total_token_count(),
        result.prompt_token_count() + result.response_token_count()
    );
}

#[tokio::test]
async fn test_dry_run_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server.uri());
    let question = "$CasibaseDryRun$ How many tokens is this?";
    let mut sink = BufferSink::new();
    let result = provider
        .query_text(question, &mut sink, &[], "", &[])
        .await
        .unwrap();

    assert_eq!(result, ModelResult::with_prompt_tokens(expected_prompt_tokens(question)));
    assert_eq!(sink.write_count(), 0);
}

#[tokio::test]
async fn test_dry_run_over_budget_is_rejected() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let question = "$CasibaseDryRun$ a question";
    let budget = expected_prompt_tokens(question);
    let provider = create_test_provider(&mock_server.uri()).with_max_tokens(budget);

    let err = provider
        .query_text(question, &mut BufferSink::new(), &[], "", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, GateError::AdmissionRejected { .. }));

    let provider = create_test_provider(&mock_server.uri()).with_max_tokens(budget + 1);
    assert!(
        provider
            .query_text(question, &mut BufferSink::new(), &[], "", &[])
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_http_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"message": "Invalid API key", "type": "invalid_request_error"}
        })))
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server.uri());
    let mut sink = BufferSink::new();
    let err = provider
        .query_text("hi", &mut sink, &[], "", &[])
        .await
        .unwrap_err();

    match err {
        GateError::Http { status_code, message, .. } => {
            assert_eq!(status_code, Some(401));
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(sink.write_count(), 0);
}

#[tokio::test]
async fn test_malformed_chunk_aborts_relay() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "data: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n\ndata: not-json\n\n",
        ))
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server.uri());
    let mut sink = BufferSink::new();
    let err = provider
        .query_text("hi", &mut sink, &[], "", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, GateError::Protocol { .. }));
    assert_eq!(sink.write_count(), 1);
}

#[tokio::test]
async fn test_connection_failure() {
    let uri = "http://127.0.0.1:1".to_string();

    let provider = create_test_provider(&uri);
    let err = provider
        .query_text("hi", &mut BufferSink::new(), &[], "", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, GateError::Http { .. }));
}
