//! End-to-end tests for `POST /analyze` against a spawned server.

mod common;

use analysis_service::services::prompt::{build_prompt, PromptVariant};
use analysis_service::services::providers::ProviderError;
use common::{failing, succeeding, TestApp, FLAGGED_ANSWER};
use serde_json::{json, Value};

#[tokio::test]
async fn flagged_text_returns_result() {
    let provider = succeeding(FLAGGED_ANSWER);
    let app = TestApp::spawn(provider.clone()).await;

    let response = app
        .post_analyze(r#"{"text": "The moon landing was faked, everyone knows it."}"#)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "result": FLAGGED_ANSWER }));

    let request = provider.last_request().expect("provider was not called");
    assert_eq!(
        request.messages[0].content,
        build_prompt(
            PromptVariant::Standard,
            "The moon landing was faked, everyone knows it."
        )
    );
}

#[tokio::test]
async fn any_non_empty_text_yields_string_result() {
    let app = TestApp::spawn(succeeding("Flags: None\nExplanation: -\nConfidence: Low")).await;

    for text in ["a", "  padded  ", "multi\nline", "ünïcødé ✓", "{\"nested\": true}"] {
        let response = app.post_analyze(json!({ "text": text }).to_string()).await;

        assert_eq!(response.status(), 200, "text {:?}", text);
        let body: Value = response.json().await.expect("Failed to parse JSON");
        assert!(body["result"].is_string());
        assert!(body.get("error").is_none());
    }
}

#[tokio::test]
async fn malformed_input_is_rejected_with_400() {
    let provider = succeeding(FLAGGED_ANSWER);
    let app = TestApp::spawn(provider.clone()).await;

    let cases = [
        (r#"{}"#, "No text provided."),
        (r#"{"text": ""}"#, "No text provided."),
        (r#"{"text": "   "}"#, "No text provided."),
        ("not json", "Invalid JSON"),
        ("", "Invalid JSON"),
    ];

    for (body, expected) in cases {
        let response = app.post_analyze(body).await;

        assert_eq!(response.status(), 400, "body {:?}", body);
        let json: Value = response.json().await.expect("Failed to parse JSON");
        assert_eq!(json, json!({ "error": expected }), "body {:?}", body);
    }

    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn upstream_failure_is_500_with_its_message() {
    let app = TestApp::spawn(failing(ProviderError::Network("timeout".to_string()))).await;

    let response = app.post_analyze(r#"{"text": "Some claim"}"#).await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "error": "timeout" }));
}

#[tokio::test]
async fn failures_do_not_affect_later_requests() {
    let app = TestApp::spawn(succeeding(FLAGGED_ANSWER)).await;

    assert_eq!(app.post_analyze("garbage").await.status(), 400);
    assert_eq!(app.post_analyze(r#"{"text": "ok"}"#).await.status(), 200);
}

#[tokio::test]
async fn identical_requests_get_identical_responses() {
    let app = TestApp::spawn(succeeding(FLAGGED_ANSWER)).await;
    let body = r#"{"text": "Vaccines contain microchips."}"#;

    let first = app.post_analyze(body).await;
    let first_status = first.status();
    let first_bytes = first.bytes().await.expect("Failed to read body");

    let second = app.post_analyze(body).await;
    let second_status = second.status();
    let second_bytes = second.bytes().await.expect("Failed to read body");

    assert_eq!(first_status, second_status);
    assert_eq!(first_bytes, second_bytes);
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let app = TestApp::spawn(succeeding(FLAGGED_ANSWER)).await;

    let requests = (0..8).map(|i| {
        let body = if i % 2 == 0 {
            json!({ "text": format!("claim {}", i) }).to_string()
        } else {
            "{}".to_string()
        };
        app.post_analyze(body)
    });

    let responses = futures::future::join_all(requests).await;
    for (i, response) in responses.into_iter().enumerate() {
        let expected = if i % 2 == 0 { 200 } else { 400 };
        assert_eq!(response.status(), expected);
    }
}
