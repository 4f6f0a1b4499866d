//! Integration tests for the HTTP API

use attune::core::{create_router, Engine, CRISIS_INSTRUCTION};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;
use serde_json::Value;

fn create_test_router() -> axum::Router {
    create_router(Engine::default())
}

async fn post_evaluate(body: &str) -> (StatusCode, Value) {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/evaluate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], attune::VERSION);
}

#[tokio::test]
async fn test_evaluate_text_only() {
    let (status, json) = post_evaluate(r#"{"text": "I feel so anxious and on edge"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["crisis"]["is_crisis"], false);
    assert_eq!(json["fused"]["state"], "activated");
    assert_eq!(json["fused"]["method"], "text_only");
    assert_eq!(json["mode"], "therapeutic");
    assert_eq!(json["biometric"]["indicators"][0], "no data");
    assert!(json["instruction"].as_str().unwrap().contains("I feel so anxious and on edge"));
}

#[tokio::test]
async fn test_evaluate_with_biometric() {
    let body = r#"{
        "text": "I feel calm",
        "history": [
            {"role": "user", "content": "rough morning"},
            {"role": "assistant", "content": "What happened?"}
        ],
        "biometric": {"heart_rate": 110, "hrv": 20, "respiration_rate": 24},
        "style": "gentle"
    }"#;
    let (status, json) = post_evaluate(body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["biometric"]["state"], "activated");
    assert_eq!(json["biometric"]["confidence"], 85);
    assert_eq!(json["fused"]["method"], "biometric_primary");
    let instruction = json["instruction"].as_str().unwrap();
    assert!(instruction.contains("User: rough morning"));
    assert!(instruction.contains("Assistant: What happened?"));
    assert!(instruction.contains("Preferred register"));
}

#[tokio::test]
async fn test_evaluate_crisis() {
    let (status, json) = post_evaluate(r#"{"text": "I swallowed pills and I'm scared"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["crisis"]["is_crisis"], true);
    assert_eq!(json["crisis"]["crisis_type"], "immediate_danger");
    assert_eq!(json["crisis"]["confidence"], 100);
    assert_eq!(json["mode"], "crisis");
    assert_eq!(json["instruction"], CRISIS_INSTRUCTION);
}

#[tokio::test]
async fn test_evaluate_rejects_missing_text() {
    let (status, _) = post_evaluate(r#"{"history": []}"#).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_lexicon_endpoint_hides_keywords() {
    let response = create_test_router()
        .oneshot(Request::builder().uri("/lexicon").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    let entries = json.as_array().unwrap();

    assert!(!entries.is_empty());
    assert!(entries.iter().any(|e| e["name"] == "DISSOCIATION" && e["state"] == "shutdown"));
    assert!(entries.iter().all(|e| e.get("keywords").is_none()));
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let response = create_test_router()
        .oneshot(Request::builder().uri("/session/abc").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
