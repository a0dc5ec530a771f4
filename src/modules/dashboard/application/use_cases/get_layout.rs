use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::dashboard::application::domain::entities::Layout;
use crate::modules::dashboard::application::ports::outgoing::layout_repository::{
    LayoutRepository, LayoutRepositoryError,
};

// ====================== Get Layout Error =============================
#[derive(Debug, Clone)]
pub enum GetLayoutError {
    NotFound,
    Forbidden,
    RepositoryError(String),
}

impl std::fmt::Display for GetLayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetLayoutError::NotFound => write!(f, "Layout not found"),
            GetLayoutError::Forbidden => write!(f, "Layout belongs to another user"),
            GetLayoutError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetLayoutError {}

impl From<LayoutRepositoryError> for GetLayoutError {
    fn from(e: LayoutRepositoryError) -> Self {
        match e {
            LayoutRepositoryError::NotFound => GetLayoutError::NotFound,
            LayoutRepositoryError::Forbidden => GetLayoutError::Forbidden,
            LayoutRepositoryError::DatabaseError(msg) => GetLayoutError::RepositoryError(msg),
        }
    }
}

// ====================== Get Layout Use Case =============================
#[async_trait]
pub trait IGetLayoutUseCase: Send + Sync {
    async fn execute(&self, layout_id: Uuid, user_id: Uuid) -> Result<Layout, GetLayoutError>;
}

#[derive(Clone)]
pub struct GetLayoutUseCase {
    repository: Arc<dyn LayoutRepository>,
}

impl GetLayoutUseCase {
    pub fn new(repository: Arc<dyn LayoutRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl IGetLayoutUseCase for GetLayoutUseCase {
    async fn execute(&self, layout_id: Uuid, user_id: Uuid) -> Result<Layout, GetLayoutError> {
        Ok(self.repository.find_owned(layout_id, user_id).await?)
    }
}
