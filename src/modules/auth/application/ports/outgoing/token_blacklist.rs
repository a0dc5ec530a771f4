use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Errors that can occur in token blacklist operations
#[derive(Debug, Clone)]
pub enum TokenBlacklistError {
    DatabaseError(String),
    InvalidToken,
}

impl std::fmt::Display for TokenBlacklistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenBlacklistError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            TokenBlacklistError::InvalidToken => write!(f, "Invalid token"),
        }
    }
}

impl std::error::Error for TokenBlacklistError {}

/// Revoked-token store (interface).
///
/// Revocation happens at two granularities: a single token (logout) and a
/// whole user (password change, account deletion). Entries live in the store
/// until their natural expiry, after which the backing store drops them on
/// its own.
#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    /// Revoke a single token. `expires_at` is the token's own expiry, used
    /// as the storage TTL.
    async fn blacklist_token(
        &self,
        token_hash: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenBlacklistError>;

    /// True when the token itself was blacklisted, or the user was revoked
    /// wholesale after the token was issued.
    async fn is_token_revoked(
        &self,
        token_hash: &str,
        user_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<bool, TokenBlacklistError>;

    /// Invalidate every token the user currently holds. Tokens issued after
    /// this call are unaffected.
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<(), TokenBlacklistError>;
}
