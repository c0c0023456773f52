// tests/test_helpers.rs
// Shared setup for the integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use coach::coach::Coach;
use coach::llm::mock::ScriptedTransport;
use coach::llm::{CompletionClient, CompletionSettings};
use coach::prompt::TurnSettings;
use coach::server::{create_router, AppState};

pub fn coach_with(transport: Arc<ScriptedTransport>) -> Coach {
    Coach::new(CompletionClient::new(
        transport,
        Some("test-key".to_string()),
        CompletionSettings {
            timeout: Duration::from_secs(5),
            ..CompletionSettings::default()
        },
    ))
}

pub fn create_test_app(transport: Arc<ScriptedTransport>) -> axum::Router {
    create_router(AppState::new(coach_with(transport), TurnSettings::default()))
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Collect the JSON payload of every `data:` line in an SSE body
pub async fn sse_events(response: axum::response::Response) -> Vec<serde_json::Value> {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec())
        .unwrap()
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| serde_json::from_str(data.trim()).unwrap())
        .collect()
}
