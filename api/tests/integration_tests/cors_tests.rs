//! Integration tests for CORS handling.
//!
//! Analytics allows any origin without credentials; observability echoes the
//! caller's origin and allows credentials.

use axum::http::{header, StatusCode};
use serde_json::json;

use super::common::{send, test_app};

const ORIGIN: &str = "http://localhost:3000";

#[tokio::test]
async fn test_analytics_uses_wildcard_origin() {
    let (app, _sink) = test_app();

    let response = send(
        app,
        "POST",
        "/analytics",
        json!({"event": "click"}).to_string(),
        &[("content-type", "application/json"), ("origin", ORIGIN)],
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN.as_str()),
        Some("*")
    );
    assert!(response
        .header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS.as_str())
        .is_none());
}

#[tokio::test]
async fn test_observability_echoes_origin_with_credentials() {
    let (app, _sink) = test_app();

    let response = send(
        app,
        "POST",
        "/observability",
        json!({"resourceSpans": []}).to_string(),
        &[("content-type", "application/json"), ("origin", ORIGIN)],
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN.as_str()),
        Some(ORIGIN)
    );
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS.as_str()),
        Some("true")
    );
}

#[tokio::test]
async fn test_observability_preflight() {
    let (app, sink) = test_app();

    let response = send(
        app,
        "OPTIONS",
        "/observability",
        "",
        &[
            ("origin", ORIGIN),
            ("access-control-request-method", "POST"),
            ("access-control-request-headers", "content-type"),
        ],
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN.as_str()),
        Some(ORIGIN)
    );

    let methods = response
        .header(header::ACCESS_CONTROL_ALLOW_METHODS.as_str())
        .unwrap()
        .to_ascii_uppercase();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));

    let headers = response
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS.as_str())
        .unwrap()
        .to_ascii_lowercase();
    assert!(headers.contains("content-type"));
    assert!(headers.contains("authorization"));

    assert!(sink.blocks().is_empty());
}

#[tokio::test]
async fn test_analytics_preflight() {
    let (app, _sink) = test_app();

    let response = send(
        app,
        "OPTIONS",
        "/analytics",
        "",
        &[("origin", ORIGIN), ("access-control-request-method", "POST")],
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN.as_str()),
        Some("*")
    );
}
