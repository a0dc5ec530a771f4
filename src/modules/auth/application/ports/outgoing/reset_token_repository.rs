use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::PasswordResetToken;

/// Data for a freshly issued reset token. The caller hashes the raw token
/// before it gets here.
#[derive(Debug, Clone)]
pub struct NewResetToken {
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResetTokenRepositoryError {
    #[error("Reset token not found")]
    TokenNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ResetTokenRepository: Send + Sync {
    async fn insert(
        &self,
        data: NewResetToken,
    ) -> Result<PasswordResetToken, ResetTokenRepositoryError>;

    /// Most recently issued token for the user, used or not. The reset flow
    /// only ever honours the latest request.
    async fn find_latest_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PasswordResetToken>, ResetTokenRepositoryError>;

    async fn mark_used(&self, token_id: Uuid) -> Result<(), ResetTokenRepositoryError>;
}
