//! Middleware for the authentication API
//!
//! Request ids, request tracing and the bearer token extractor.

pub mod auth;
mod request_id;
mod tracing;

pub use auth::AuthenticatedWallet;
pub use request_id::{current_request_id, request_id, RequestId, REQUEST_ID_HEADER};
pub use tracing::request_tracing;
