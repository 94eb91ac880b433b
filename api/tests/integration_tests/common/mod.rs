//! Common test utilities and helpers for integration tests.
//!
//! This module provides shared functionality used across all integration tests,
//! including test app setup and HTTP request helpers.

use api::{create_router, AppState, Config};
use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use shared::sink::MemorySink;
use std::sync::Arc;

/// A response reduced to what the tests look at.
pub struct TestResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body as text.
    pub body: String,
}

impl TestResponse {
    /// Returns a header value as a string, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Creates a test router writing into a fresh in-memory sink.
///
/// # Returns
///
/// A tuple containing the configured router and the sink.
pub fn test_app() -> (Router, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let router = create_router(AppState::new(sink.clone()), &Config::default());
    (router, sink)
}

/// Sends a request with an optional body and extra headers.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: impl Into<Body>,
    headers: &[(&str, &str)],
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let response = tower::ServiceExt::oneshot(app, builder.body(body.into()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(body_bytes.to_vec()).unwrap(),
    }
}

/// Helper to make a POST request with a raw JSON body.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> TestResponse {
    send(
        app,
        "POST",
        uri,
        body.into(),
        &[(header::CONTENT_TYPE.as_str(), "application/json")],
    )
    .await
}

/// Helper to make a POST request with a JSON value.
pub async fn post_json(app: Router, uri: &str, body: &serde_json::Value) -> TestResponse {
    post_raw(app, uri, serde_json::to_string(body).unwrap()).await
}
