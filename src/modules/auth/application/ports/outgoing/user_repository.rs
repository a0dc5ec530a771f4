use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

/// Data needed to insert a new account row. Password arrives already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// Confirmation DTO for write operations. Deliberately excludes the
/// password hash.
#[derive(Debug, Clone)]
pub struct UserResult {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_verified: bool,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, data: CreateUserData) -> Result<UserResult, UserRepositoryError>;

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError>;

    /// Flips `is_active` and `is_verified` after email verification.
    async fn activate_user(&self, user_id: Uuid) -> Result<UserResult, UserRepositoryError>;

    async fn set_name(
        &self,
        user_id: Uuid,
        first_name: String,
        last_name: String,
    ) -> Result<UserResult, UserRepositoryError>;

    /// Hard delete. Owned layouts, preferences and reset tokens go with the
    /// row via FK cascade.
    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError>;
}

#[derive(Debug, Clone)]
pub enum UserRepositoryError {
    UserAlreadyExists,
    UserNotFound,
    DatabaseError(String),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for UserRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRepositoryError::UserNotFound => write!(f, "User not found"),
            UserRepositoryError::UserAlreadyExists => write!(f, "User already exists"),
            UserRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for UserRepositoryError {}
