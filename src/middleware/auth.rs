//! Authentication middleware
//!
//! Extractor for access token verification. It only depends on the
//! [`TokenVerifier`] capability, so any verifier can sit behind it.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;
use std::sync::Arc;

use super::current_request_id;
use crate::auth::{Audience, Claims, CredentialError, TokenVerifier};

/// Wallet extracted from a verified access token
#[derive(Debug, Clone)]
pub struct AuthenticatedWallet {
    pub wallet: String,
    pub claims: Claims,
}

/// Error response for authentication failures
#[derive(Debug, Serialize)]
struct AuthRejection {
    error: AuthRejectionDetails,
}

#[derive(Debug, Serialize)]
struct AuthRejectionDetails {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
}

impl AuthRejection {
    fn new(code: &str, message: &str) -> Self {
        Self {
            error: AuthRejectionDetails {
                code: code.to_string(),
                message: message.to_string(),
                request_id: current_request_id(),
            },
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}

/// Extractor for authenticated wallets
///
/// Accepts `Authorization: Bearer <token>` as well as a bare token in the
/// header.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(auth: AuthenticatedWallet) -> impl IntoResponse {
///     format!("Hello, {}", auth.wallet)
/// }
/// ```
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedWallet
where
    Arc<dyn TokenVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
        {
            Ok(TypedHeader(Authorization(bearer))) => bearer.token().to_string(),
            Err(_) => raw_token(&parts.headers).ok_or_else(|| {
                AuthRejection::new("MISSING_TOKEN", "Authorization header required")
                    .into_response()
            })?,
        };

        let verifier: Arc<dyn TokenVerifier> = FromRef::from_ref(state);

        let claims = verifier.verify_token(&token).map_err(|e| {
            let (code, message) = match e {
                CredentialError::TokenExpired => ("TOKEN_EXPIRED", "Token has expired"),
                _ => ("INVALID_TOKEN", "Invalid token"),
            };
            AuthRejection::new(code, message).into_response()
        })?;

        if claims.aud != Audience::Access {
            return Err(
                AuthRejection::new("INVALID_TOKEN_TYPE", "Expected access token").into_response(),
            );
        }

        Ok(AuthenticatedWallet {
            wallet: claims.wallet.clone(),
            claims,
        })
    }
}

fn raw_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
