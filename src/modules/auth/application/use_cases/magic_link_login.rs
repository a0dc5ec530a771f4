use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::modules::auth::application::ports::outgoing::{
    token_provider::{TokenError, TokenProvider},
    UserQuery,
};
use crate::modules::auth::application::use_cases::login_user::{LoginUserResponse, UserInfo};

// ====================== Magic Link Login Error =============================
#[derive(Debug, Clone)]
pub enum MagicLinkLoginError {
    InvalidToken,
    TokenExpired,
    TokenGenerationFailed(String),
    QueryError(String),
}

impl std::fmt::Display for MagicLinkLoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MagicLinkLoginError::InvalidToken => write!(f, "Invalid magic link token"),
            MagicLinkLoginError::TokenExpired => write!(f, "Magic link has expired"),
            MagicLinkLoginError::TokenGenerationFailed(msg) => {
                write!(f, "Token generation failed: {}", msg)
            }
            MagicLinkLoginError::QueryError(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for MagicLinkLoginError {}

// ============================ Magic Link Login Use Case =============================
#[async_trait]
pub trait IMagicLinkLoginUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<LoginUserResponse, MagicLinkLoginError>;
}

#[derive(Clone)]
pub struct MagicLinkLoginUseCase {
    token_provider: Arc<dyn TokenProvider>,
    query: Arc<dyn UserQuery>,
}

impl MagicLinkLoginUseCase {
    pub fn new(token_provider: Arc<dyn TokenProvider>, query: Arc<dyn UserQuery>) -> Self {
        Self {
            token_provider,
            query,
        }
    }
}

#[async_trait]
impl IMagicLinkLoginUseCase for MagicLinkLoginUseCase {
    async fn execute(&self, token: &str) -> Result<LoginUserResponse, MagicLinkLoginError> {
        let user_id = self
            .token_provider
            .verify_magic_link_token(token.trim())
            .map_err(|e| match e {
                TokenError::TokenExpired => MagicLinkLoginError::TokenExpired,
                _ => MagicLinkLoginError::InvalidToken,
            })?;

        // A token for a deleted account is just an invalid token.
        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| MagicLinkLoginError::QueryError(e.to_string()))?
            .ok_or(MagicLinkLoginError::InvalidToken)?;

        if !user.is_active {
            return Err(MagicLinkLoginError::InvalidToken);
        }

        let access_token = self
            .token_provider
            .generate_access_token(user.id, user.is_verified)
            .map_err(|e| MagicLinkLoginError::TokenGenerationFailed(e.to_string()))?;

        let refresh_token = self
            .token_provider
            .generate_refresh_token(user.id, user.is_verified)
            .map_err(|e| MagicLinkLoginError::TokenGenerationFailed(e.to_string()))?;

        info!("Magic link login for user: {}", user.id);

        Ok(LoginUserResponse {
            access_token,
            refresh_token,
            user: UserInfo {
                id: user.id,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                is_verified: user.is_verified,
            },
        })
    }
}
