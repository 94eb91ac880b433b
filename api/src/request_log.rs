//! Request metadata logging middleware.

use axum::{
    extract::{ConnectInfo, Request},
    http::{header, HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;

/// Logs method, path, peer address, user agent and origin of every request.
///
/// The peer address is only known when the router is served with
/// `into_make_service_with_connect_info`; otherwise it is logged as `unknown`.
pub async fn log_request(request: Request, next: Next) -> Response {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "unknown".to_string(), |ConnectInfo(addr)| addr.to_string());

    tracing::info!(
        method = %request.method(),
        path = %request.uri().path(),
        %remote_addr,
        user_agent = header_str(request.headers(), &header::USER_AGENT),
        origin = header_str(request.headers(), &header::ORIGIN),
        "Received request"
    );

    next.run(request).await
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
