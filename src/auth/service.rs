//! Authentication service
//!
//! Orchestrates the login flow: the signature check runs first, and only a
//! wallet that passed it is handed to the credential manager.

use std::sync::Arc;

use thiserror::Error;

use super::challenge::build_challenge;
use super::crypto::{verify_signature, CryptoError};
use super::jwt::{CredentialError, CredentialManager, TokenPair};

/// Auth service errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Signature(#[from] CryptoError),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Authentication service
#[derive(Debug, Clone)]
pub struct AuthService {
    credentials: Arc<CredentialManager>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(credentials: Arc<CredentialManager>) -> Self {
        Self { credentials }
    }

    /// Generate the challenge message for a wallet
    pub fn challenge(&self, wallet: &str, request_id: &str) -> String {
        build_challenge(wallet, request_id)
    }

    /// Verify a signed message and issue tokens for the signing wallet
    pub fn login(
        &self,
        message: &str,
        signature: &str,
        public_key: &str,
    ) -> Result<TokenPair, AuthError> {
        if let Err(e) = verify_signature(message, signature, public_key) {
            tracing::debug!(wallet = %public_key, error = %e, "Signature rejected");
            return Err(e.into());
        }

        let tokens = self.credentials.issue_tokens(public_key)?;
        tracing::info!(wallet = %public_key, "Wallet authenticated");

        Ok(tokens)
    }

    /// Refresh tokens using a valid refresh token
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let tokens = self.credentials.refresh_token(refresh_token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh rejected");
            e
        })?;

        Ok(tokens)
    }
}
