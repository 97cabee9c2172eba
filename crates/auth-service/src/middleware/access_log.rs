//! Access log middleware.
//!
//! Emits one structured record per request under the `auth.access` target,
//! including requests rejected by the authentication gate and framework-level
//! errors (404, 405, 415) that never reach a handler.

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;

/// Peer IP address, if the server was started with connect info.
pub fn client_ip(request: &Request) -> Option<String> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}

/// Middleware that logs status, latency, peer, method and URI.
///
/// Applied as the outermost layer so rejected requests are logged too.
pub async fn access_log(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();
    let client_ip = client_ip(&request).unwrap_or_else(|| "-".to_string());

    let response = next.run(request).await;

    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    tracing::info!(
        target: "auth.access",
        status_code = response.status().as_u16(),
        latency_ms,
        client_ip = %client_ip,
        method = %method,
        uri = %uri,
        "Request completed"
    );

    response
}
