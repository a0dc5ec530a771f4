use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::{
    token_blacklist::TokenBlacklist, UserRepository, UserRepositoryError,
};

// ====================== Delete Account Error =============================
#[derive(Debug, Clone)]
pub enum DeleteAccountError {
    UserNotFound,
    RepositoryError(String),
}

impl std::fmt::Display for DeleteAccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteAccountError::UserNotFound => write!(f, "User not found"),
            DeleteAccountError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteAccountError {}

// ============================ Delete Account Use Case =============================
#[async_trait]
pub trait IDeleteAccountUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<(), DeleteAccountError>;
}

#[derive(Clone)]
pub struct DeleteAccountUseCase {
    repository: Arc<dyn UserRepository>,
    token_blacklist: Arc<dyn TokenBlacklist>,
}

impl DeleteAccountUseCase {
    pub fn new(repository: Arc<dyn UserRepository>, token_blacklist: Arc<dyn TokenBlacklist>) -> Self {
        Self {
            repository,
            token_blacklist,
        }
    }
}

#[async_trait]
impl IDeleteAccountUseCase for DeleteAccountUseCase {
    async fn execute(&self, user_id: Uuid) -> Result<(), DeleteAccountError> {
        // Layouts, widget preferences and reset tokens cascade with the row.
        self.repository
            .delete_user(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => DeleteAccountError::UserNotFound,
                other => DeleteAccountError::RepositoryError(other.to_string()),
            })?;

        // The row is already gone, so a failed revocation only shortens the
        // window in which outstanding tokens still verify.
        if let Err(e) = self.token_blacklist.revoke_all_user_tokens(user_id).await {
            warn!("Failed to revoke tokens for deleted user {}: {}", user_id, e);
        }

        info!("Account deleted: {}", user_id);
        Ok(())
    }
}
