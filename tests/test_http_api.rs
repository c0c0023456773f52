// tests/test_http_api.rs
// HTTP API driven through the router with oneshot requests

mod test_helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use coach::llm::mock::{delta_frame, ScriptedTransport};
use test_helpers::{body_json, create_test_app, empty_request, json_request, sse_events};

async fn create_session(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(empty_request("POST", "/api/sessions"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["session_id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_status_and_catalogue() {
    let app = create_test_app(Arc::new(ScriptedTransport::deltas(&[])));

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/status"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let status = body_json(response).await;
    assert_eq!(status["status"], "ok");
    assert_eq!(status["credential_configured"], true);
    assert_eq!(status["model"], "llama-3.3-70b-versatile");

    let response = app
        .oneshot(empty_request("GET", "/api/catalogue"))
        .await
        .unwrap();
    let catalogue = body_json(response).await;
    assert_eq!(catalogue["personas"].as_array().unwrap().len(), 4);
    assert_eq!(catalogue["domains"].as_array().unwrap().len(), 9);
    assert_eq!(catalogue["quick_actions"].as_array().unwrap().len(), 4);
    assert_eq!(catalogue["verbosity"], json!({ "min": 1, "max": 10 }));
    assert_eq!(
        catalogue["defaults"],
        json!({
            "persona": "Competitive Pro Coach",
            "domain": "General Gaming",
            "verbosity": 5
        })
    );
}

#[tokio::test]
async fn test_index_serves_ui() {
    let app = create_test_app(Arc::new(ScriptedTransport::deltas(&[])));
    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&body).contains("AI Gaming Strategy Coach"));
}

#[tokio::test]
async fn test_chat_stream_then_transcript() {
    let app = create_test_app(Arc::new(ScriptedTransport::deltas(&["Stay", " calm."])));
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/api/sessions/{id}/messages")))
        .await
        .unwrap();
    let transcript = body_json(response).await;
    assert!(transcript["placeholder"].as_str().unwrap().contains("Welcome"));

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{id}/chat/stream"),
            json!({
                "message": "How do I aim better?",
                "persona": "Hype Man",
                "domain": "Valorant",
                "verbosity": 2
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let events = sse_events(response).await;
    assert_eq!(
        events,
        vec![
            json!({ "type": "user", "content": "How do I aim better?" }),
            json!({ "type": "assistant", "content": "Stay" }),
            json!({ "type": "assistant", "content": "Stay calm." }),
            json!({ "type": "done", "message_count": 2 }),
        ]
    );

    let response = app
        .oneshot(empty_request("GET", &format!("/api/sessions/{id}/messages")))
        .await
        .unwrap();
    let transcript = body_json(response).await;
    assert!(transcript.get("placeholder").is_none());
    let messages = transcript["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["avatar"], "🎮");
    assert_eq!(messages[1]["avatar"], "🤖");
    assert_eq!(messages[1]["content"], "Stay calm.");
}

#[tokio::test]
async fn test_quick_action_stream() {
    let transport = Arc::new(ScriptedTransport::deltas(&["Rush B."]));
    let app = create_test_app(transport.clone());
    let id = create_session(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{id}/quick-actions/stream"),
            json!({ "action": "Counter Strategy", "domain": "CS2/CS:GO" }),
        ))
        .await
        .unwrap();
    let events = sse_events(response).await;

    assert_eq!(events[0]["type"], "user");
    assert!(events[0]["content"].as_str().unwrap().contains("CS2/CS:GO"));
    assert_eq!(events.last().unwrap()["message_count"], 2);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_blank_message_only_settles() {
    let transport = Arc::new(ScriptedTransport::deltas(&["unused"]));
    let app = create_test_app(transport.clone());
    let id = create_session(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{id}/chat/stream"),
            json!({ "message": "   " }),
        ))
        .await
        .unwrap();

    let events = sse_events(response).await;
    assert_eq!(events, vec![json!({ "type": "done", "message_count": 0 })]);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_blank_message_ignores_unknown_selectors() {
    let transport = Arc::new(ScriptedTransport::deltas(&["unused"]));
    let app = create_test_app(transport.clone());
    let id = create_session(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{id}/chat/stream"),
            json!({ "message": "\t\n", "persona": "Drill Sergeant", "verbosity": 0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let events = sse_events(response).await;
    assert_eq!(events, vec![json!({ "type": "done", "message_count": 0 })]);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_rejections() {
    let app = create_test_app(Arc::new(ScriptedTransport::deltas(&[])));
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{id}/chat/stream"),
            json!({ "message": "hi", "persona": "Drill Sergeant" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert_eq!(error["error_code"], "BAD_REQUEST");
    assert_eq!(error["message"], "unknown persona 'Drill Sergeant'");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{id}/quick-actions/stream"),
            json!({ "action": "Dance" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/sessions/00000000-0000-0000-0000-000000000000/chat/stream",
            json!({ "message": "hi" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_busy_session_conflicts() {
    let transport = Arc::new(ScriptedTransport::stalled(vec![delta_frame("Thinking")]));
    let app = create_test_app(transport);
    let id = create_session(&app).await;

    // Headers arrive while the turn is still stalled
    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{id}/chat/stream"),
            json!({ "message": "first" }),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{id}/chat/stream"),
            json!({ "message": "second" }),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let clear = app
        .oneshot(empty_request("DELETE", &format!("/api/sessions/{id}/messages")))
        .await
        .unwrap();
    assert_eq!(clear.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_clear_resets_transcript() {
    let app = create_test_app(Arc::new(ScriptedTransport::deltas(&["ok"])));
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{id}/chat/stream"),
            json!({ "message": "hello" }),
        ))
        .await
        .unwrap();
    let _ = sse_events(response).await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/api/sessions/{id}/messages")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(empty_request("GET", &format!("/api/sessions/{id}/messages")))
        .await
        .unwrap();
    let transcript = body_json(response).await;
    assert_eq!(transcript["messages"].as_array().unwrap().len(), 0);
}
