//! Authentication HTTP handlers
//!
//! Endpoints for wallet-based authentication.

use axum::{extract::State, Extension, Json};

use crate::auth::TokenPair;
use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::middleware::{AuthenticatedWallet, RequestId};
use crate::models::{
    ChallengeRequest, ChallengeResponse, ClaimsResponse, RefreshTokenRequest, VerifyRequest,
};
use crate::state::AppState;

/// POST /auth/request - Get the message a wallet must sign
pub async fn request_challenge(
    State(state): State<AppState>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    ValidatedJson(req): ValidatedJson<ChallengeRequest>,
) -> ApiResult<Json<ChallengeResponse>> {
    let message = state.auth_service.challenge(&req.public_key, &request_id);

    Ok(Json(ChallengeResponse { message }))
}

/// POST /auth/verify - Verify a signed message and issue tokens
pub async fn verify_signature(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<VerifyRequest>,
) -> ApiResult<Json<TokenPair>> {
    let tokens = state
        .auth_service
        .login(&req.message, &req.signature, &req.public_key)?;

    Ok(Json(tokens))
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<TokenPair>> {
    let tokens = state.auth_service.refresh(&req.refresh_token)?;

    Ok(Json(tokens))
}

/// GET /auth/me - Claims of the presented access token
pub async fn get_current_wallet(auth: AuthenticatedWallet) -> Json<ClaimsResponse> {
    Json(auth.claims.into())
}
