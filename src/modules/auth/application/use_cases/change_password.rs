use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::{
    password_hasher::PasswordHasher, token_blacklist::TokenBlacklist, UserRepository,
};
use crate::modules::auth::application::use_cases::login_user::validate_password;

// ========================= Change Password Request =========================
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    new_password: String,
}

impl ChangePasswordRequest {
    pub fn new(new_password: String) -> Result<Self, ChangePasswordError> {
        let new_password =
            validate_password(new_password).map_err(|_| ChangePasswordError::EmptyPassword)?;
        Ok(Self { new_password })
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }
}

// ====================== Change Password Error =============================
#[derive(Debug, Clone)]
pub enum ChangePasswordError {
    EmptyPassword,
    HashingFailed(String),
    RepositoryError(String),
    RevocationFailed(String),
}

impl std::fmt::Display for ChangePasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangePasswordError::EmptyPassword => write!(f, "Password cannot be empty"),
            ChangePasswordError::HashingFailed(msg) => write!(f, "Hashing failed: {}", msg),
            ChangePasswordError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            ChangePasswordError::RevocationFailed(msg) => {
                write!(f, "Token revocation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for ChangePasswordError {}

// ============================ Change Password Use Case =============================
#[async_trait]
pub trait IChangePasswordUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        request: ChangePasswordRequest,
    ) -> Result<(), ChangePasswordError>;
}

#[derive(Clone)]
pub struct ChangePasswordUseCase {
    password_hasher: Arc<dyn PasswordHasher>,
    repository: Arc<dyn UserRepository>,
    token_blacklist: Arc<dyn TokenBlacklist>,
}

impl ChangePasswordUseCase {
    pub fn new(
        password_hasher: Arc<dyn PasswordHasher>,
        repository: Arc<dyn UserRepository>,
        token_blacklist: Arc<dyn TokenBlacklist>,
    ) -> Self {
        Self {
            password_hasher,
            repository,
            token_blacklist,
        }
    }
}

#[async_trait]
impl IChangePasswordUseCase for ChangePasswordUseCase {
    async fn execute(
        &self,
        user_id: Uuid,
        request: ChangePasswordRequest,
    ) -> Result<(), ChangePasswordError> {
        let new_hash = self
            .password_hasher
            .hash_password(request.new_password())
            .await
            .map_err(|e| ChangePasswordError::HashingFailed(e.to_string()))?;

        self.repository
            .update_password(user_id, new_hash)
            .await
            .map_err(|e| ChangePasswordError::RepositoryError(e.to_string()))?;

        // Every session the user held before the change is now stale.
        self.token_blacklist
            .revoke_all_user_tokens(user_id)
            .await
            .map_err(|e| ChangePasswordError::RevocationFailed(e.to_string()))?;

        info!("Password changed for user: {}", user_id);
        Ok(())
    }
}
