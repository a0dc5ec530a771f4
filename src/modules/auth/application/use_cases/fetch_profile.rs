use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::UserQuery;

// ====================== Profile Response =============================
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

// ====================== Fetch Profile Error =============================
#[derive(Debug, Clone)]
pub enum FetchProfileError {
    UserNotFound,
    QueryError(String),
}

impl std::fmt::Display for FetchProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchProfileError::UserNotFound => write!(f, "User not found"),
            FetchProfileError::QueryError(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for FetchProfileError {}

// ============================ Fetch Profile Use Case =============================
#[async_trait]
pub trait IFetchProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<ProfileResponse, FetchProfileError>;
}

#[derive(Clone)]
pub struct FetchProfileUseCase {
    query: Arc<dyn UserQuery>,
}

impl FetchProfileUseCase {
    pub fn new(query: Arc<dyn UserQuery>) -> Self {
        Self { query }
    }
}

#[async_trait]
impl IFetchProfileUseCase for FetchProfileUseCase {
    async fn execute(&self, user_id: Uuid) -> Result<ProfileResponse, FetchProfileError> {
        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| FetchProfileError::QueryError(e.to_string()))?
            .ok_or(FetchProfileError::UserNotFound)?;

        Ok(ProfileResponse {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        })
    }
}
