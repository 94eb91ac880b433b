//! Observability ingestion endpoints.
//!
//! Accepts structured logs and OTLP/JSON span exports, renders them to the
//! console sink, and acknowledges them.
//!
//! # Endpoints
//!
//! - `POST /observability` - Print a structured log or OTLP spans
//! - `POST /observability/logs` - Same handler, the path the logging client posts to

use super::{echo_event, method_not_allowed, Acknowledgement, CORS_HEADERS, CORS_METHODS};
use crate::error::IngestError;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    routing::post,
    Json, Router,
};
use shared::payload::{parse_body, Payload};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates the observability routes with application state.
pub fn observability_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/observability",
            post(ingest_observability).fallback(method_not_allowed),
        )
        .route(
            "/observability/logs",
            post(ingest_observability).fallback(method_not_allowed),
        )
        .layer(observability_cors())
        .with_state(state)
}

/// Telemetry is posted by browser SDKs with credentials, so the origin is
/// echoed back instead of using a wildcard.
fn observability_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods(CORS_METHODS)
        .allow_headers(CORS_HEADERS)
}

/// Handler for observability ingestion.
///
/// The raw body is echoed before classification, so even rejected payloads
/// show up on the console.
async fn ingest_observability(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Acknowledgement>, IngestError> {
    let bytes = body.map_err(IngestError::BodyRead)?;
    let body = parse_body(&bytes)?;

    echo_event(state.sink(), "Observability", &body)?;

    let payload = Payload::from_body(&body)?;
    let kind = payload.kind();

    match &payload {
        Payload::StructuredLog(log) => {
            tracing::debug!(level = %log.level, service = %log.service, "Rendering structured log");
        }
        Payload::SpanBundle(bundle) => {
            tracing::debug!(
                resources = bundle.resource_spans.len(),
                spans = bundle.span_count(),
                "Rendering OTLP spans"
            );
        }
    }

    let rendered = payload.render();
    if !rendered.is_empty() {
        state
            .sink()
            .write_block(&rendered)
            .map_err(|source| IngestError::Processing {
                what: kind.as_str(),
                source,
            })?;
    }

    Ok(Json(Acknowledgement::ok()))
}
