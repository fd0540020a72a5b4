//! Request tracing middleware

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use std::time::Instant;

/// Best-effort client IP from proxy headers
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string())
        })
}

/// Middleware logging one structured event per request with latency
///
/// Only the method and path are logged. Credentials travel in bodies and
/// Authorization headers, so neither is ever recorded.
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client_ip = client_ip(request.headers());

    let start = Instant::now();
    let response = next.run(request).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            client_ip = ?client_ip,
            latency_ms = %latency_ms,
            "Request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            client_ip = ?client_ip,
            latency_ms = %latency_ms,
            "Request rejected"
        );
    } else {
        tracing::info!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            client_ip = ?client_ip,
            latency_ms = %latency_ms,
            "Request completed"
        );
    }

    response
}
