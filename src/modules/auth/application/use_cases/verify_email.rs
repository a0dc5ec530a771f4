use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::modules::auth::application::ports::outgoing::{
    token_provider::{TokenError, TokenProvider},
    user_repository::UserResult,
    UserRepository, UserRepositoryError,
};

// ====================== Verify Email Error =============================
#[derive(Debug, Clone)]
pub enum VerifyEmailError {
    InvalidToken,
    TokenExpired,
    UserNotFound,
    RepositoryError(String),
}

impl std::fmt::Display for VerifyEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyEmailError::InvalidToken => write!(f, "Invalid verification token"),
            VerifyEmailError::TokenExpired => write!(f, "Verification token has expired"),
            VerifyEmailError::UserNotFound => write!(f, "User not found"),
            VerifyEmailError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for VerifyEmailError {}

// ============================ Verify Email Use Case =============================
#[async_trait]
pub trait IVerifyEmailUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<UserResult, VerifyEmailError>;
}

#[derive(Clone)]
pub struct VerifyEmailUseCase {
    token_provider: Arc<dyn TokenProvider>,
    repository: Arc<dyn UserRepository>,
}

impl VerifyEmailUseCase {
    pub fn new(token_provider: Arc<dyn TokenProvider>, repository: Arc<dyn UserRepository>) -> Self {
        Self {
            token_provider,
            repository,
        }
    }
}

#[async_trait]
impl IVerifyEmailUseCase for VerifyEmailUseCase {
    async fn execute(&self, token: &str) -> Result<UserResult, VerifyEmailError> {
        let user_id = self
            .token_provider
            .verify_verification_token(token)
            .map_err(|e| match e {
                TokenError::TokenExpired => VerifyEmailError::TokenExpired,
                _ => VerifyEmailError::InvalidToken,
            })?;

        let activated = self
            .repository
            .activate_user(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => VerifyEmailError::UserNotFound,
                other => VerifyEmailError::RepositoryError(other.to_string()),
            })?;

        info!("Email verified for user: {}", activated.id);
        Ok(activated)
    }
}
