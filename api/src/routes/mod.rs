//! API route definitions.
//!
//! This module organizes all HTTP routes for the debug sink server.

mod analytics;
mod health;
mod observability;

pub use analytics::analytics_routes;
pub use health::health_routes;
pub use observability::observability_routes;

use crate::error::IngestError;
use axum::http::{header, HeaderName, Method};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use shared::payload::JsonBody;
use shared::render::JsonBlock;
use shared::sink::ConsoleSink;

/// Methods both ingest endpoints allow cross-origin.
const CORS_METHODS: [Method; 2] = [Method::POST, Method::OPTIONS];

/// Headers both ingest endpoints allow cross-origin.
const CORS_HEADERS: [HeaderName; 2] = [header::CONTENT_TYPE, header::AUTHORIZATION];

/// Fixed acknowledgement returned by every successful ingest.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Always `"ok"`.
    pub status: String,
}

impl Acknowledgement {
    /// The success acknowledgement.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Fallback for methods an ingest endpoint does not handle.
async fn method_not_allowed() -> IngestError {
    IngestError::MethodNotAllowed
}

/// Prints the receipt banner and the body re-indented from its original text.
fn echo_event(
    sink: &dyn ConsoleSink,
    label: &str,
    body: &JsonBody<'_>,
) -> Result<(), IngestError> {
    let received_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    tracing::info!(%received_at, "{label} event received");

    let block = format!(
        "\n=== {label} Event Received at {received_at} ===\n{}",
        JsonBlock(body.text())
    );
    sink.write_block(&block)
        .map_err(|source| IngestError::Processing {
            what: "request body",
            source,
        })
}
