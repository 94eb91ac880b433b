//! Integration tests for the analytics endpoint.
//!
//! Tests cover:
//! - Acknowledgement for arbitrary objects
//! - Empty and malformed bodies
//! - Method handling

use axum::body::Body;
use axum::http::StatusCode;
use serde_json::json;

use super::common::{post_json, post_raw, send, test_app};

#[tokio::test]
async fn test_any_object_is_acknowledged() {
    let events = [
        json!({}),
        json!({"event": "page_view"}),
        json!({
            "event": "web_vitals",
            "properties": {"name": "LCP", "value": 1234.5, "rating": "good"},
            "session": {"id": "abc", "new": false},
            "tags": ["a", "b"],
            "nothing": null
        }),
    ];

    for event in &events {
        let (app, _sink) = test_app();
        let response = post_json(app, "/analytics", event).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, r#"{"status":"ok"}"#);
    }
}

#[tokio::test]
async fn test_event_is_pretty_printed() {
    let (app, sink) = test_app();

    let response = post_json(
        app,
        "/analytics",
        &json!({"event": "signup", "properties": {"plan": "pro"}}),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let printed = sink.contents();
    assert!(printed.starts_with("\n=== Analytics Event Received at "));
    assert!(printed.ends_with(
        "{\n  \"event\": \"signup\",\n  \"properties\": {\n    \"plan\": \"pro\"\n  }\n}\n"
    ));
}

#[tokio::test]
async fn test_empty_body_is_client_error() {
    let (app, sink) = test_app();

    let response = post_raw(app, "/analytics", "").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(!response.body.is_empty());
    assert_ne!(response.body, r#"{"status":"ok"}"#);
    assert!(sink.blocks().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_client_error() {
    let (app, sink) = test_app();

    let response = post_raw(app, "/analytics", r#"{"event": "#).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "Error parsing JSON");
    assert!(sink.blocks().is_empty());
}

#[tokio::test]
async fn test_put_is_method_not_allowed() {
    let (app, _sink) = test_app();

    let response = send(app, "PUT", "/analytics", Body::empty(), &[]).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, "Method not allowed");
}

#[tokio::test]
async fn test_options_is_acknowledged_without_body() {
    let (app, sink) = test_app();

    let response = send(app, "OPTIONS", "/analytics", Body::empty(), &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());
    assert!(sink.blocks().is_empty());
}
