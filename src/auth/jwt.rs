//! JWT token issuance and validation
//!
//! Handles creation, verification and refresh of access and refresh tokens.
//! Tokens are self-contained: nothing is stored server side, so a refresh
//! token stays usable until its own expiry even after it has been exchanged.

use std::fmt;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Access token lifetime (1 hour)
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Refresh token lifetime (7 days)
pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Unexpected signing method: {0}")]
    UnexpectedSigningMethod(String),

    #[error("Token is malformed or its signature is invalid")]
    TokenMalformed,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token is empty")]
    EmptyToken,

    #[error("The token is not a refresh token")]
    WrongAudience,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}

impl CredentialError {
    /// Whether the error is a server-side failure rather than bad caller input
    pub fn is_internal(&self) -> bool {
        matches!(self, CredentialError::SigningFailed(_))
    }
}

/// Token audience, distinguishing access tokens from refresh tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Access,
    Refresh,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Access => "access",
            Audience::Refresh => "refresh",
        }
    }

    fn ttl(&self) -> Duration {
        match self {
            Audience::Access => Duration::seconds(ACCESS_TOKEN_TTL_SECONDS),
            Audience::Refresh => Duration::seconds(REFRESH_TOKEN_TTL_SECONDS),
        }
    }
}

/// JWT claims shared by access and refresh tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Wallet address (base58 public key)
    pub wallet: String,
    /// JWT ID, unique per issuance
    pub jti: String,
    /// Audience tag
    pub aud: Audience,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Access and refresh token issued together
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Remaining access token lifetime in seconds
    pub expires_in: i64,
}

/// Anything that can turn a bearer token into verified claims
pub trait TokenVerifier: Send + Sync {
    fn verify_token(&self, token: &str) -> Result<Claims, CredentialError>;
}

/// Issues, verifies and refreshes token pairs with a shared HMAC secret
#[derive(Clone)]
pub struct CredentialManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialManager")
            .field("algorithm", &SIGNING_ALGORITHM)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize)]
struct DeclaredHeader {
    alg: String,
}

impl CredentialManager {
    /// Create a manager bound to the given signing secret
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a fresh access/refresh token pair for a wallet
    pub fn issue_tokens(&self, wallet: &str) -> Result<TokenPair, CredentialError> {
        let access_token = self.generate_token(wallet, Audience::Access)?;
        let refresh_token = self.generate_token(wallet, Audience::Refresh)?;

        tracing::debug!(wallet = %wallet, "Issued token pair");

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: ACCESS_TOKEN_TTL_SECONDS,
        })
    }

    /// Verify and decode a token
    ///
    /// The declared algorithm is checked before anything else in the token
    /// is looked at; only HS256 is accepted.
    pub fn verify_token(&self, token: &str) -> Result<Claims, CredentialError> {
        let alg = declared_algorithm(token)?;
        if alg != "HS256" {
            tracing::debug!(alg = %alg, "Rejected token with unexpected signing method");
            return Err(CredentialError::UnexpectedSigningMethod(alg));
        }

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        // Audience is checked by callers against a specific token kind
        validation.validate_aud = false;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => CredentialError::TokenExpired,
                    ErrorKind::InvalidAlgorithm => {
                        CredentialError::UnexpectedSigningMethod(alg.clone())
                    }
                    _ => {
                        tracing::debug!(error = %e, "Token failed validation");
                        CredentialError::TokenMalformed
                    }
                }
            })?;

        Ok(token_data.claims)
    }

    /// Exchange a refresh token for a brand new token pair
    ///
    /// The presented token is not consumed.
    pub fn refresh_token(&self, token: &str) -> Result<TokenPair, CredentialError> {
        if token.is_empty() {
            return Err(CredentialError::EmptyToken);
        }

        let claims = self.verify_token(token)?;

        if claims.aud != Audience::Refresh {
            return Err(CredentialError::WrongAudience);
        }

        self.issue_tokens(&claims.wallet)
    }

    fn generate_token(&self, wallet: &str, audience: Audience) -> Result<String, CredentialError> {
        let now = Utc::now();
        let exp = now + audience.ttl();

        let claims = Claims {
            wallet: wallet.to_string(),
            jti: Uuid::new_v4().to_string(),
            aud: audience,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, CredentialError> {
        encode(&Header::new(SIGNING_ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| CredentialError::SigningFailed(e.to_string()))
    }
}

impl TokenVerifier for CredentialManager {
    fn verify_token(&self, token: &str) -> Result<Claims, CredentialError> {
        CredentialManager::verify_token(self, token)
    }
}

/// Read the `alg` a token declares in its JOSE header
fn declared_algorithm(token: &str) -> Result<String, CredentialError> {
    let encoded = token
        .split('.')
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or(CredentialError::TokenMalformed)?;

    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| CredentialError::TokenMalformed)?;

    let header: DeclaredHeader =
        serde_json::from_slice(&bytes).map_err(|_| CredentialError::TokenMalformed)?;

    Ok(header.alg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const WALLET: &str = "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T";

    fn manager() -> CredentialManager {
        CredentialManager::new("test-secret-key")
    }

    fn expired_claims(audience: Audience) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            wallet: WALLET.to_string(),
            jti: Uuid::new_v4().to_string(),
            aud: audience,
            iat: now - 7200,
            exp: now - 10,
        }
    }

    fn forge_with_alg(alg: &str, claims: &Claims) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD
            .encode(format!(r#"{{"alg":"{}","typ":"JWT"}}"#, alg));
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
        format!("{}.{}.", header, payload)
    }

    #[test]
    fn test_issue_then_verify_access_token() {
        let manager = manager();
        let tokens = manager.issue_tokens(WALLET).unwrap();

        assert_eq!(tokens.expires_in, 3600);

        let claims = manager.verify_token(&tokens.access_token).unwrap();
        assert_eq!(claims.wallet, WALLET);
        assert_eq!(claims.aud, Audience::Access);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_issue_then_verify_refresh_token() {
        let manager = manager();
        let tokens = manager.issue_tokens(WALLET).unwrap();

        let claims = manager.verify_token(&tokens.refresh_token).unwrap();
        assert_eq!(claims.wallet, WALLET);
        assert_eq!(claims.aud, Audience::Refresh);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_pair_has_distinct_token_ids() {
        let manager = manager();
        let tokens = manager.issue_tokens(WALLET).unwrap();

        let access = manager.verify_token(&tokens.access_token).unwrap();
        let refresh = manager.verify_token(&tokens.refresh_token).unwrap();
        assert_ne!(access.jti, refresh.jti);
    }

    #[test]
    fn test_refresh_with_refresh_token() {
        let manager = manager();
        let tokens = manager.issue_tokens(WALLET).unwrap();

        let refreshed = manager.refresh_token(&tokens.refresh_token).unwrap();
        let claims = manager.verify_token(&refreshed.access_token).unwrap();
        assert_eq!(claims.wallet, WALLET);
        assert_eq!(claims.aud, Audience::Access);
    }

    #[test]
    fn test_refresh_with_access_token_is_rejected() {
        let manager = manager();
        let tokens = manager.issue_tokens(WALLET).unwrap();

        let result = manager.refresh_token(&tokens.access_token);
        assert_eq!(result.unwrap_err(), CredentialError::WrongAudience);
    }

    #[test]
    fn test_refresh_empty_token() {
        let result = manager().refresh_token("");
        assert_eq!(result.unwrap_err(), CredentialError::EmptyToken);
    }

    #[test]
    fn test_refresh_token_is_reusable_and_yields_fresh_ids() {
        let manager = manager();
        let original = manager.issue_tokens(WALLET).unwrap();

        let first = manager.refresh_token(&original.refresh_token).unwrap();
        let second = manager.refresh_token(&original.refresh_token).unwrap();

        let mut seen = HashSet::new();
        for token in [
            &original.access_token,
            &original.refresh_token,
            &first.access_token,
            &first.refresh_token,
            &second.access_token,
            &second.refresh_token,
        ] {
            let claims = manager.verify_token(token).unwrap();
            assert!(seen.insert(claims.jti), "token id issued twice");
        }
    }

    #[test]
    fn test_expired_token() {
        let manager = manager();
        let token = manager.sign(&expired_claims(Audience::Access)).unwrap();

        assert_eq!(
            manager.verify_token(&token).unwrap_err(),
            CredentialError::TokenExpired
        );
    }

    #[test]
    fn test_expired_refresh_token_cannot_refresh() {
        let manager = manager();
        let token = manager.sign(&expired_claims(Audience::Refresh)).unwrap();

        assert_eq!(
            manager.refresh_token(&token).unwrap_err(),
            CredentialError::TokenExpired
        );
    }

    #[test]
    fn test_wrong_secret() {
        let tokens = CredentialManager::new("secret1").issue_tokens(WALLET).unwrap();

        let result = CredentialManager::new("secret2").verify_token(&tokens.access_token);
        assert_eq!(result.unwrap_err(), CredentialError::TokenMalformed);
    }

    #[test]
    fn test_tampered_payload() {
        let manager = manager();
        let tokens = manager.issue_tokens(WALLET).unwrap();
        let parts: Vec<&str> = tokens.access_token.split('.').collect();

        let mut claims = manager.verify_token(&tokens.access_token).unwrap();
        claims.wallet = "someone-else".to_string();
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let forged = format!("{}.{}.{}", parts[0], payload, parts[2]);

        assert_eq!(
            manager.verify_token(&forged).unwrap_err(),
            CredentialError::TokenMalformed
        );
    }

    #[test]
    fn test_invalid_token() {
        let manager = manager();
        for token in ["", "invalid.token.here", "not-a-jwt", "..."] {
            assert_eq!(
                manager.verify_token(token).unwrap_err(),
                CredentialError::TokenMalformed,
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_other_hmac_algorithm_is_rejected() {
        let manager = manager();
        let now = Utc::now().timestamp();
        let claims = Claims {
            wallet: WALLET.to_string(),
            jti: Uuid::new_v4().to_string(),
            aud: Audience::Refresh,
            iat: now,
            exp: now + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key"),
        )
        .unwrap();

        assert_eq!(
            manager.verify_token(&token).unwrap_err(),
            CredentialError::UnexpectedSigningMethod("HS384".to_string())
        );
        assert!(matches!(
            manager.refresh_token(&token),
            Err(CredentialError::UnexpectedSigningMethod(_))
        ));
    }

    #[test]
    fn test_unsigned_token_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            wallet: WALLET.to_string(),
            jti: Uuid::new_v4().to_string(),
            aud: Audience::Access,
            iat: now,
            exp: now + 600,
        };

        for alg in ["none", "RS256", "ES256"] {
            let token = forge_with_alg(alg, &claims);
            assert_eq!(
                manager().verify_token(&token).unwrap_err(),
                CredentialError::UnexpectedSigningMethod(alg.to_string())
            );
        }
    }

    #[test]
    fn test_algorithm_checked_before_expiry() {
        let token = forge_with_alg("none", &expired_claims(Audience::Access));
        assert!(matches!(
            manager().verify_token(&token),
            Err(CredentialError::UnexpectedSigningMethod(_))
        ));
    }

    #[test]
    fn test_error_classification() {
        assert!(CredentialError::SigningFailed("boom".to_string()).is_internal());
        assert!(!CredentialError::TokenExpired.is_internal());
        assert!(!CredentialError::WrongAudience.is_internal());
        assert!(!CredentialError::TokenMalformed.is_internal());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let manager = CredentialManager::new("super-secret-value");
        let debug = format!("{:?}", manager);
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_audience_serialization() {
        assert_eq!(serde_json::to_string(&Audience::Access).unwrap(), "\"access\"");
        assert_eq!(Audience::Refresh.as_str(), "refresh");
    }
}
