//! Request tracing middleware

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use super::request_id::RequestId;

/// Middleware for logging request information with timing
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();

    let start = Instant::now();
    tracing::debug!(%method, %path, %request_id, "Request started");

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        tracing::error!(%method, %path, %request_id, status, duration_ms, "Request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, %path, %request_id, status, duration_ms, "Request rejected");
    } else {
        tracing::info!(%method, %path, %request_id, status, duration_ms, "Request completed");
    }

    response
}
