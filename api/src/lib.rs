//! Debug Sink API Server
//!
//! This crate provides the HTTP server for the local debug sink. It accepts
//! analytics events and observability telemetry, prints them to the console,
//! and acknowledges every well-formed request with `{"status":"ok"}`.
//!
//! # Architecture
//!
//! The server is built on Axum and Tokio, providing:
//! - `POST /analytics` for arbitrary analytics events
//! - `POST /observability` for structured logs and OTLP/JSON spans
//! - `GET /health` for readiness checks
//!
//! # Example
//!
//! ```no_run
//! use api::run_server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_server().await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod request_log;
mod routes;
mod state;

pub use config::{Config, LogFormat, DEFAULT_BODY_LIMIT, DEFAULT_PORT};
pub use error::IngestError;
pub use routes::Acknowledgement;
pub use state::AppState;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, middleware, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Runs the debug sink server.
///
/// This function initializes the server with configuration from environment variables
/// and starts listening for incoming connections. It handles graceful shutdown on
/// SIGTERM/SIGINT signals.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    run_server_with_config(config).await
}

/// Runs the debug sink server with the provided configuration.
///
/// Rendered payloads are written to standard output.
///
/// # Errors
///
/// Returns an error if:
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server_with_config(config: Config) -> Result<()> {
    tracing::info!(
        host = %config.host,
        port = %config.port,
        body_limit = config.body_limit,
        "Debug sink server starting"
    );

    let app = create_router(AppState::with_stdout_sink(), &config);
    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    let addr = listener.local_addr()?;

    tracing::info!(%addr, "Listening for connections");
    tracing::info!(
        "Send analytics events to http://localhost:{}/analytics",
        addr.port()
    );
    tracing::info!(
        "Send logs and spans to http://localhost:{}/observability",
        addr.port()
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Creates the main application router with all routes and middleware.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .merge(routes::health_routes(config.body_limit))
        .merge(routes::analytics_routes(state.clone()))
        .merge(routes::observability_routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.body_limit))
        .layer(middleware::from_fn(request_log::log_request))
        .layer(TraceLayer::new_for_http())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
