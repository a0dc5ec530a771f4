use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::modules::auth::application::ports::outgoing::{
    token_blacklist::TokenBlacklist,
    token_hasher::hash_token,
    token_provider::{TokenError, TokenProvider},
};

// ========================= Refresh Request =========================
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ====================== Refresh Response =============================
#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

// ====================== Refresh Error =============================
#[derive(Debug, Clone)]
pub enum RefreshTokenError {
    TokenExpired,
    TokenRevoked,
    InvalidToken,
    TokenGenerationFailed(String),
    BlacklistError(String),
}

impl std::fmt::Display for RefreshTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshTokenError::TokenExpired => write!(f, "Refresh token has expired"),
            RefreshTokenError::TokenRevoked => write!(f, "Refresh token has been revoked"),
            RefreshTokenError::InvalidToken => write!(f, "Invalid refresh token"),
            RefreshTokenError::TokenGenerationFailed(msg) => {
                write!(f, "Token generation failed: {}", msg)
            }
            RefreshTokenError::BlacklistError(msg) => write!(f, "Blacklist error: {}", msg),
        }
    }
}

impl std::error::Error for RefreshTokenError {}

// ============================ Refresh Use Case =============================
#[async_trait]
pub trait IRefreshTokenUseCase: Send + Sync {
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError>;
}

#[derive(Clone)]
pub struct RefreshTokenUseCase {
    token_provider: Arc<dyn TokenProvider>,
    token_blacklist: Arc<dyn TokenBlacklist>,
}

impl RefreshTokenUseCase {
    pub fn new(
        token_provider: Arc<dyn TokenProvider>,
        token_blacklist: Arc<dyn TokenBlacklist>,
    ) -> Self {
        Self {
            token_provider,
            token_blacklist,
        }
    }
}

#[async_trait]
impl IRefreshTokenUseCase for RefreshTokenUseCase {
    async fn execute(
        &self,
        request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError> {
        let refresh_token = request.refresh_token.trim();

        let claims = self
            .token_provider
            .verify_token(refresh_token)
            .map_err(|e| match e {
                TokenError::TokenExpired => RefreshTokenError::TokenExpired,
                _ => RefreshTokenError::InvalidToken,
            })?;

        if claims.token_type != "refresh" {
            return Err(RefreshTokenError::InvalidToken);
        }

        // Revocation covers both explicit logout of this token and bulk
        // revocation (password change) issued after it was minted.
        let issued_at = chrono::DateTime::from_timestamp(claims.iat, 0)
            .ok_or(RefreshTokenError::InvalidToken)?;

        let revoked = self
            .token_blacklist
            .is_token_revoked(&hash_token(refresh_token), claims.sub, issued_at)
            .await
            .map_err(|e| RefreshTokenError::BlacklistError(e.to_string()))?;

        if revoked {
            return Err(RefreshTokenError::TokenRevoked);
        }

        let access_token = self
            .token_provider
            .generate_access_token(claims.sub, claims.is_verified)
            .map_err(|e| RefreshTokenError::TokenGenerationFailed(e.to_string()))?;

        Ok(RefreshTokenResponse { access_token })
    }
}
