//! Health check endpoint.
//!
//! Lets scripts wait for the sink to come up before sending events, and
//! reports what the running instance accepts.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status (always "healthy" if reachable).
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Largest accepted request body, in bytes.
    pub body_limit: usize,
    /// Paths that accept payloads.
    pub endpoints: &'static [&'static str],
}

/// Paths the sink prints payloads from.
pub const INGEST_ENDPOINTS: &[&str] = &["/analytics", "/observability", "/observability/logs"];

/// Creates the health check routes for a server enforcing `body_limit`.
pub fn health_routes(body_limit: usize) -> Router {
    Router::new().route("/health", get(move || health_check(body_limit)))
}

async fn health_check(body_limit: usize) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "debug-sink",
        version: env!("CARGO_PKG_VERSION"),
        body_limit,
        endpoints: INGEST_ENDPOINTS,
    })
}
