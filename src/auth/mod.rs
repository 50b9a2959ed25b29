//! Authentication module
//!
//! Provides wallet-based authentication using ed25519 keypairs.
//! - Challenge messages for the wallet to sign
//! - Signature verification against base58 public keys
//! - JWT access/refresh token issuance, validation and refresh

mod challenge;
mod crypto;
mod jwt;
mod service;

pub use challenge::build_challenge;
pub use crypto::{verify_signature, CryptoError};
pub use jwt::{
    Audience, Claims, CredentialError, CredentialManager, TokenPair, TokenVerifier,
    ACCESS_TOKEN_TTL_SECONDS, REFRESH_TOKEN_TTL_SECONDS,
};
pub use service::{AuthError, AuthService};
