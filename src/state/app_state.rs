//! Application state shared across handlers

use std::sync::Arc;

use crate::auth::{AuthService, CredentialManager, TokenVerifier};

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub token_verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(credentials: Arc<CredentialManager>) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(credentials.clone())),
            token_verifier: credentials,
        }
    }

    /// Replace the verifier used by protected routes
    pub fn with_token_verifier(mut self, token_verifier: Arc<dyn TokenVerifier>) -> Self {
        self.token_verifier = token_verifier;
        self
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<dyn TokenVerifier> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.token_verifier.clone()
    }
}
