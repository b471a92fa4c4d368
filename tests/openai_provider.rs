//! Integration tests for the OpenAI provider adapter
//!
//! Uses wiremock to stand in for the upstream API so the adapter's request
//! shape, auth header, and failure handling can be verified without network
//! access or a real credential.

use chatrelay::config::Config;
use chatrelay::provider::{OpenAiProvider, ProviderError, TextGenerationProvider};
use std::str::FromStr;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenAiProvider {
    let toml = format!(
        r#"
[provider]
model = "gpt-4o-mini"
base_url = "{}/v1"
temperature = 0.7
max_tokens = 256
system_instruction = "You are a concise assistant."
"#,
        server.uri()
    );
    let config = Config::from_str(&toml).expect("should parse test config");
    OpenAiProvider::new(
        &config.provider,
        "test-key".to_string(),
        Duration::from_secs(5),
    )
    .expect("should build provider")
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
    })
}

#[tokio::test]
async fn test_generate_returns_completion_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Phishing is a social-engineering attack...")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let reply = provider
        .generate("What is phishing?")
        .await
        .expect("should succeed");

    assert_eq!(reply, "Phishing is a social-engineering attack...");
}

#[tokio::test]
async fn test_generate_sends_bearer_auth_and_fixed_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o-mini",
            "temperature": 0.7,
            "max_tokens": 256,
            "messages": [
                {"role": "system", "content": "You are a concise assistant."},
                {"role": "user", "content": "hello"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("hi")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    provider.generate("hello").await.expect("should succeed");
}

#[tokio::test]
async fn test_generate_maps_auth_rejection_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error"
            }
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.generate("hello").await.unwrap_err();

    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("expected Api error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_maps_plain_text_failure_to_api_error() {
    let server = MockServer::start().await;

    // Proxies in front of the API answer with non-JSON bodies
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.generate("hello").await.unwrap_err();

    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("upstream unavailable"));
        }
        other => panic!("expected Api error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_rejects_undecodable_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.generate("hello").await.unwrap_err();

    assert!(
        matches!(err, ProviderError::Decode(_)),
        "expected Decode error, got: {:?}",
        err
    );
}

#[tokio::test]
async fn test_generate_rejects_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": []
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.generate("hello").await.unwrap_err();

    assert!(matches!(err, ProviderError::EmptyCompletion));
}

#[tokio::test]
async fn test_generate_rejects_null_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": null},
                "finish_reason": "stop"
            }]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.generate("hello").await.unwrap_err();

    assert!(matches!(err, ProviderError::EmptyCompletion));
}

#[tokio::test]
async fn test_generate_maps_connection_failure_to_transport_error() {
    // Port from a server that has been shut down - connection refused.
    // Use an exclusive (non-pooled) server: `MockServer::start()` hands out a
    // pooled listener that stays alive after drop and would answer 404.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let toml = format!(
        r#"
[provider]
model = "gpt-4o-mini"
base_url = "{}/v1"
"#,
        uri
    );
    let config = Config::from_str(&toml).expect("should parse test config");
    let provider = OpenAiProvider::new(
        &config.provider,
        "test-key".to_string(),
        Duration::from_secs(2),
    )
    .expect("should build provider");

    let err = provider.generate("hello").await.unwrap_err();
    assert!(
        matches!(err, ProviderError::Transport(_)),
        "expected Transport error, got: {:?}",
        err
    );
}
