use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::{
    password_hasher::PasswordHasher,
    reset_token_repository::ResetTokenRepository,
    token_hasher::hash_token,
    UserRepository,
};
use crate::modules::auth::application::use_cases::login_user::validate_password;

// ========================= Reset Password Request =========================
#[derive(Debug, Clone)]
pub struct ResetPasswordRequest {
    user_id: Uuid,
    token: String,
    new_password: String,
}

impl ResetPasswordRequest {
    pub fn new(
        user_id: Uuid,
        token: String,
        new_password: String,
    ) -> Result<Self, ResetPasswordError> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(ResetPasswordError::TokenMismatch);
        }
        let new_password =
            validate_password(new_password).map_err(|_| ResetPasswordError::EmptyPassword)?;

        Ok(Self {
            user_id,
            token,
            new_password,
        })
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

// ====================== Reset Password Error =============================
#[derive(Debug, Clone)]
pub enum ResetPasswordError {
    NoResetRequest,
    TokenAlreadyUsed,
    TokenExpired,
    TokenMismatch,
    EmptyPassword,
    HashingFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for ResetPasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetPasswordError::NoResetRequest => {
                write!(f, "No password reset was requested for this account")
            }
            ResetPasswordError::TokenAlreadyUsed => {
                write!(f, "Reset token has already been used")
            }
            ResetPasswordError::TokenExpired => write!(f, "Reset token has expired"),
            ResetPasswordError::TokenMismatch => write!(f, "Reset token does not match"),
            ResetPasswordError::EmptyPassword => write!(f, "Password cannot be empty"),
            ResetPasswordError::HashingFailed(msg) => write!(f, "Hashing failed: {}", msg),
            ResetPasswordError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ResetPasswordError {}

// ============================ Reset Password Use Case =============================
#[async_trait]
pub trait IResetPasswordUseCase: Send + Sync {
    async fn execute(&self, request: ResetPasswordRequest) -> Result<(), ResetPasswordError>;
}

#[derive(Clone)]
pub struct ResetPasswordUseCase {
    reset_tokens: Arc<dyn ResetTokenRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    repository: Arc<dyn UserRepository>,
}

impl ResetPasswordUseCase {
    pub fn new(
        reset_tokens: Arc<dyn ResetTokenRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            reset_tokens,
            password_hasher,
            repository,
        }
    }
}

#[async_trait]
impl IResetPasswordUseCase for ResetPasswordUseCase {
    async fn execute(&self, request: ResetPasswordRequest) -> Result<(), ResetPasswordError> {
        // Only the latest issued token for the user is ever honoured.
        let token = self
            .reset_tokens
            .find_latest_for_user(request.user_id)
            .await
            .map_err(|e| ResetPasswordError::RepositoryError(e.to_string()))?
            .ok_or(ResetPasswordError::NoResetRequest)?;

        if token.is_used {
            return Err(ResetPasswordError::TokenAlreadyUsed);
        }

        if token.is_expired() {
            return Err(ResetPasswordError::TokenExpired);
        }

        if hash_token(&request.token) != token.token_hash {
            return Err(ResetPasswordError::TokenMismatch);
        }

        let new_hash = self
            .password_hasher
            .hash_password(&request.new_password)
            .await
            .map_err(|e| ResetPasswordError::HashingFailed(e.to_string()))?;

        self.repository
            .update_password(request.user_id, new_hash)
            .await
            .map_err(|e| ResetPasswordError::RepositoryError(e.to_string()))?;

        self.reset_tokens
            .mark_used(token.id)
            .await
            .map_err(|e| ResetPasswordError::RepositoryError(e.to_string()))?;

        info!("Password reset completed for user: {}", request.user_id);
        Ok(())
    }
}
