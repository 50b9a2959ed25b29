//! Wallet Authentication Server Library
//!
//! Challenge/response login for ed25519 wallets and the JWT credentials
//! issued after a successful login.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
