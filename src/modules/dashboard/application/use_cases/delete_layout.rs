use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::dashboard::application::ports::outgoing::layout_repository::{
    LayoutRepository, LayoutRepositoryError,
};

// ====================== Delete Layout Error =============================
#[derive(Debug, Clone)]
pub enum DeleteLayoutError {
    NotFound,
    Forbidden,
    RepositoryError(String),
}

impl std::fmt::Display for DeleteLayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteLayoutError::NotFound => write!(f, "Layout not found"),
            DeleteLayoutError::Forbidden => write!(f, "Layout belongs to another user"),
            DeleteLayoutError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteLayoutError {}

impl From<LayoutRepositoryError> for DeleteLayoutError {
    fn from(e: LayoutRepositoryError) -> Self {
        match e {
            LayoutRepositoryError::NotFound => DeleteLayoutError::NotFound,
            LayoutRepositoryError::Forbidden => DeleteLayoutError::Forbidden,
            LayoutRepositoryError::DatabaseError(msg) => DeleteLayoutError::RepositoryError(msg),
        }
    }
}

// ====================== Delete Layout Use Case =============================
#[async_trait]
pub trait IDeleteLayoutUseCase: Send + Sync {
    async fn execute(&self, layout_id: Uuid, user_id: Uuid) -> Result<(), DeleteLayoutError>;
}

#[derive(Clone)]
pub struct DeleteLayoutUseCase {
    repository: Arc<dyn LayoutRepository>,
}

impl DeleteLayoutUseCase {
    pub fn new(repository: Arc<dyn LayoutRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl IDeleteLayoutUseCase for DeleteLayoutUseCase {
    async fn execute(&self, layout_id: Uuid, user_id: Uuid) -> Result<(), DeleteLayoutError> {
        Ok(self.repository.delete_owned(layout_id, user_id).await?)
    }
}
