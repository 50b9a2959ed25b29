//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, method_not_allowed};
use crate::state::AppState;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/request",
            post(auth::request_challenge).fallback(method_not_allowed),
        )
        .route(
            "/auth/verify",
            post(auth::verify_signature).fallback(method_not_allowed),
        )
        .route(
            "/auth/refresh",
            post(auth::refresh_token).fallback(method_not_allowed),
        )
        .route(
            "/auth/me",
            get(auth::get_current_wallet).fallback(method_not_allowed),
        )
}
