//! Route definitions for the authentication API

mod auth;
mod system;

pub use auth::auth_routes;
pub use system::system_routes;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::config::Config;
use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Assemble the full application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    let routes = Router::new()
        .merge(system_routes())
        .merge(auth_routes())
        .fallback(handlers::not_found)
        .with_state(state);

    with_middleware(routes, config)
}

fn with_middleware(router: Router, config: &Config) -> Router {
    router
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(configure_cors(config.cors_allowed_origins.as_deref()))
}

fn configure_cors(allowed_origins: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([middleware::REQUEST_ID_HEADER.clone()])
}
