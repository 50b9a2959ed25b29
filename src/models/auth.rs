//! Authentication models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::Claims;

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Request for an authentication challenge
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChallengeRequest {
    #[validate(length(min = 1, message = "public_key is required"))]
    pub public_key: String,
}

/// Response containing the message to sign
#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub message: String,
}

/// Request to verify a signed message
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct VerifyRequest {
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
    /// Base64-encoded signature
    #[validate(length(min = 1, message = "signature is required"))]
    pub signature: String,
    /// Base58-encoded public key
    #[validate(length(min = 1, message = "public_key is required"))]
    pub public_key: String,
}

/// Refresh token request
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// Verified token claims as exposed by the API
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimsResponse {
    pub wallet: String,
    pub token_id: String,
    pub audience: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<Claims> for ClaimsResponse {
    fn from(claims: Claims) -> Self {
        Self {
            wallet: claims.wallet,
            token_id: claims.jti,
            audience: claims.aud.as_str().to_string(),
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}
