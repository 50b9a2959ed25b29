//! Service-level handlers: root, health and fallback

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::error::ApiError;

#[derive(Serialize)]
pub struct RootResponse {
    pub build_tag: &'static str,
}

/// GET / - Current build tag
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        build_tag: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health
pub async fn health_check() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint Not Found".to_string())
}

/// Fallback for known routes hit with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
