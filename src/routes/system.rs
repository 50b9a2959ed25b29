//! Root and health routes

use axum::{routing::get, Router};

use crate::handlers::{method_not_allowed, system};
use crate::state::AppState;

pub fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(system::root).fallback(method_not_allowed))
        .route(
            "/health",
            get(system::health_check).fallback(method_not_allowed),
        )
}
