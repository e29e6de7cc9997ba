//! Integration tests for the completion client against a mock HTTP server.

use commitron::commit::{CharCounter, DIFF_HEADER, generate_commit_message};
use commitron::config::{BudgetConfig, LlmConfig};
use commitron::error::LlmError;
use commitron::llm::{ArkClient, CompletionClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> LlmConfig {
    LlmConfig {
        base_url: format!("{}/api/v3", server.uri()),
        endpoint: "ep-20240101-test".to_string(),
        api_key: "secret-key".to_string(),
        prompt: "You write commit messages.".to_string(),
    }
}

fn answer(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    }))
}

#[tokio::test]
async fn test_complete_sends_bearer_and_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/chat/completions"))
        .and(header("authorization", "Bearer secret-key"))
        .and(body_partial_json(json!({
            "model": "ep-20240101-test",
            "messages": [
                {"role": "system", "content": "sys"},
                {"role": "user", "content": "question"}
            ]
        })))
        .respond_with(answer("feat: add thing"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ArkClient::new(&config(&server)).unwrap();
    let text = client.complete("sys", "question").await.unwrap();
    assert_eq!(text, "feat: add thing");
}

#[tokio::test]
async fn test_complete_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = ArkClient::new(&config(&server)).unwrap();
    let err = client.complete("sys", "question").await.unwrap_err();
    match err {
        LlmError::ApiError { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_complete_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ArkClient::new(&config(&server)).unwrap();
    let err = client.complete("sys", "question").await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_generate_commit_message_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/chat/completions"))
        .respond_with(answer("```\nfix(parser): skip short lines\n```"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(&server);
    let client = ArkClient::new(&config).unwrap();
    let diff = "diff --git a/src/parser.rs b/src/parser.rs\n--- a/src/parser.rs\n+++ b/src/parser.rs\n@@ -1 +1 @@\n-a\n+b\n";

    let message = generate_commit_message(
        &client,
        &config.prompt,
        diff,
        &BudgetConfig::default(),
        &CharCounter,
    )
    .await
    .unwrap();
    assert_eq!(message, "fix(parser): skip short lines");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let question = body["messages"][1]["content"].as_str().unwrap();
    assert_eq!(question, format!("{DIFF_HEADER}{diff}"));
    assert_eq!(body["messages"][0]["content"], "You write commit messages.");
}
