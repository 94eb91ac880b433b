//! Integration tests for the observability endpoint.
//!
//! Tests cover:
//! - Structured log rendering
//! - OTLP span rendering, ordering and value resolution
//! - Classification failures

use axum::http::StatusCode;
use serde_json::json;

use super::common::{post_json, post_raw, test_app};

#[tokio::test]
async fn test_structured_log_renders_level_and_message() {
    let (app, sink) = test_app();

    let response = post_json(
        app,
        "/observability",
        &json!({"type":"structured_log","timestamp":"t","level":"info","message":"m","service":"s"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, r#"{"status":"ok"}"#);

    let rendered = sink.blocks().pop().unwrap();
    let line = rendered.lines().next().unwrap();
    assert!(line.contains("info"));
    assert!(line.contains(" m"));
}

#[tokio::test]
async fn test_structured_log_with_error_and_trace() {
    let (app, sink) = test_app();

    let response = post_json(
        app,
        "/observability/logs",
        &json!({
            "type": "structured_log",
            "timestamp": "2024-05-01T12:00:00.000Z",
            "level": "ERROR",
            "message": "Failed to add todo",
            "service": "todo-app",
            "metadata": {"todoId": 7},
            "error": {"name": "Error", "message": "db down"},
            "traceId": "4bf92f3577b34da6a3ce929d0e0e4736",
            "spanId": "00f067aa0ba902b7"
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);

    let rendered = sink.blocks().pop().unwrap();
    assert!(rendered.starts_with("[2024-05-01T12:00:00.000Z] ERROR todo-app: Failed to add todo\n"));
    assert!(rendered.contains("  TraceID: 4bf92f3577b34da6a3ce929d0e0e4736\n"));
    assert!(rendered.contains("  Error: Error: db down\n"));
    assert!(rendered.contains("      \"todoId\": 7\n"));
}

#[tokio::test]
async fn test_structured_log_missing_fields_is_parse_error() {
    let (app, _sink) = test_app();

    let response = post_json(
        app,
        "/observability",
        &json!({"type": "structured_log", "message": "m"}),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "Error parsing structured log");
}

#[tokio::test]
async fn test_empty_resource_spans_prints_no_spans() {
    let (app, sink) = test_app();

    let response = post_json(app, "/observability", &json!({"resourceSpans": []})).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, r#"{"status":"ok"}"#);
    assert!(!sink.contents().contains("Span:"));
    assert!(!sink.contents().contains("=== Resource ==="));
}

#[tokio::test]
async fn test_unknown_shape_is_rejected() {
    let (app, _sink) = test_app();

    let response = post_json(app, "/observability", &json!({"foo": "bar"})).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "Unknown data type");
}

#[tokio::test]
async fn test_empty_body_is_rejected() {
    let (app, _sink) = test_app();

    let response = post_raw(app, "/observability", "").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(!response.body.is_empty());
}

#[tokio::test]
async fn test_otlp_export_is_rendered() {
    let (app, sink) = test_app();

    // Raw text so the nanosecond timestamps are sent exactly as written
    let body = r#"{
        "resourceSpans": [{
            "resource": {
                "attributes": [
                    {"key": "service.name", "value": {"stringValue": "todo-app"}},
                    {"key": "process.pid", "value": {"intValue": "4242"}},
                    {"key": "zeroed", "value": {"stringValue": "", "intValue": 0, "boolValue": false}}
                ],
                "droppedAttributesCount": 0
            },
            "scopeSpans": [{
                "scope": {"name": "next.js", "version": "0.0.1"},
                "spans": [{
                    "traceId": "5b8efff798038103d269b633813fc60c",
                    "spanId": "eee19b7ec3c1b174",
                    "name": "render route (app) /",
                    "kind": 1,
                    "startTimeUnixNano": "1700000000000000000",
                    "endTimeUnixNano": "1700000000123456789",
                    "attributes": [{"key": "next.route", "value": {"stringValue": "/"}}],
                    "status": {"code": 0},
                    "events": [],
                    "links": [],
                    "droppedAttributesCount": 2,
                    "droppedEventsCount": 0,
                    "droppedLinksCount": 0
                }]
            }]
        }]
    }"#;

    let response = post_raw(app, "/observability", body).await;
    assert_eq!(response.status, StatusCode::OK);

    let rendered = sink.blocks().pop().unwrap();
    assert!(rendered.contains("  service.name: todo-app\n"));
    assert!(rendered.contains("  process.pid: 4242\n"));
    assert!(rendered.contains("  zeroed: \n"));
    assert!(rendered.contains("=== Scope: next.js (Version: 0.0.1) ==="));
    assert!(rendered.contains("  Start Time: 1700000000000000000\n"));
    assert!(rendered.contains("  End Time: 1700000000123456789\n"));
    assert!(rendered.contains("    next.route: /\n"));
    assert!(rendered.contains("  Dropped Attributes: 2\n"));
    assert!(!rendered.contains("Dropped Events"));
    assert!(!rendered.contains("Events:"));
}

#[tokio::test]
async fn test_multiple_resources_keep_input_order() {
    let (app, sink) = test_app();

    let response = post_json(
        app,
        "/observability",
        &json!({
            "resourceSpans": [
                {"scopeSpans": [{"scope": {"name": "zeta"}, "spans": [{"name": "second"}, {"name": "first"}]}]},
                {"scopeSpans": [{"scope": {}, "spans": [{"name": "alpha"}]}]}
            ]
        }),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let rendered = sink.blocks().pop().unwrap();
    let zeta = rendered.find("=== Scope: zeta ===").unwrap();
    let second = rendered.find("Span: second").unwrap();
    let first = rendered.find("Span: first").unwrap();
    let unnamed = rendered.find("=== Scope: unnamed ===").unwrap();
    let alpha = rendered.find("Span: alpha").unwrap();

    assert!(zeta < second && second < first && first < unnamed && unnamed < alpha);
}

#[tokio::test]
async fn test_null_lists_are_accepted() {
    let (app, sink) = test_app();

    let response = post_raw(
        app,
        "/observability",
        r#"{"resourceSpans":[{"resource":{"attributes":null},"scopeSpans":[{"scope":{"name":"s"},"spans":null}]}]}"#,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let rendered = sink.blocks().pop().unwrap();
    assert!(rendered.contains("=== Scope: s ==="));
    assert!(!rendered.contains("Span:"));
}

#[tokio::test]
async fn test_metadata_and_echo_keep_sender_order() {
    let (app, sink) = test_app();

    let body = r#"{"type":"structured_log","timestamp":"t","level":"info","message":"m","service":"s","metadata":{"zeta":1,"alpha":98765432109876543210987}}"#;
    let response = post_raw(app, "/observability", body).await;
    assert_eq!(response.status, StatusCode::OK);

    let blocks = sink.blocks();
    assert_eq!(blocks.len(), 2);
    for block in &blocks {
        let zeta = block.find("\"zeta\": 1").unwrap();
        let alpha = block.find("\"alpha\": 98765432109876543210987").unwrap();
        assert!(zeta < alpha);
    }
    assert!(blocks[0].find("\"type\"").unwrap() < blocks[0].find("\"service\"").unwrap());
}

#[tokio::test]
async fn test_invalid_int_value_is_otlp_parse_error() {
    let (app, _sink) = test_app();

    let response = post_json(
        app,
        "/observability",
        &json!({
            "resourceSpans": [{
                "resource": {"attributes": [{"key": "k", "value": {"intValue": "twelve"}}]}
            }]
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, "Error parsing OTLP spans");
}
