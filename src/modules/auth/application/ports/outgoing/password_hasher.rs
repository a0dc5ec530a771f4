use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum HashError {
    #[error("Password hashing failed")]
    HashFailed,

    #[error("Password verification failed")]
    VerifyFailed,

    #[error("Background task failed")]
    TaskFailed,
}

/// Hashing runs off the async executor; implementations must not block the
/// runtime thread.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;

    /// Ok(false) is a wrong password; Err is an operational failure.
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
