//! Request and response models for the HTTP API

pub mod auth;
pub use auth::*;
