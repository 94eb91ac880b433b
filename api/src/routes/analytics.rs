//! Analytics ingestion endpoint.
//!
//! Accepts any JSON object, prints it, and acknowledges it.
//!
//! # Endpoints
//!
//! - `POST /analytics` - Print an analytics event

use super::{echo_event, method_not_allowed, Acknowledgement, CORS_HEADERS, CORS_METHODS};
use crate::error::IngestError;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    routing::post,
    Json, Router,
};
use shared::payload::parse_body;
use tower_http::cors::{Any, CorsLayer};

/// Creates the analytics routes with application state.
pub fn analytics_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/analytics",
            post(ingest_analytics).fallback(method_not_allowed),
        )
        .layer(analytics_cors())
        .with_state(state)
}

/// Analytics events come from browsers on any origin, without credentials.
fn analytics_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(CORS_METHODS)
        .allow_headers(CORS_HEADERS)
}

/// Handler for analytics ingestion.
async fn ingest_analytics(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Acknowledgement>, IngestError> {
    let bytes = body.map_err(IngestError::BodyRead)?;
    let body = parse_body(&bytes)?;

    echo_event(state.sink(), "Analytics", &body)?;

    Ok(Json(Acknowledgement::ok()))
}
