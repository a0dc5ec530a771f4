use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::dashboard::application::domain::entities::Layout;
use crate::modules::dashboard::application::ports::outgoing::layout_repository::LayoutRepository;

// ====================== List Layouts Error =============================
#[derive(Debug, Clone)]
pub enum ListLayoutsError {
    RepositoryError(String),
}

impl std::fmt::Display for ListLayoutsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListLayoutsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListLayoutsError {}

// ====================== List Layouts Use Case =============================
#[async_trait]
pub trait IListLayoutsUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<Vec<Layout>, ListLayoutsError>;
}

#[derive(Clone)]
pub struct ListLayoutsUseCase {
    repository: Arc<dyn LayoutRepository>,
}

impl ListLayoutsUseCase {
    pub fn new(repository: Arc<dyn LayoutRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl IListLayoutsUseCase for ListLayoutsUseCase {
    async fn execute(&self, user_id: Uuid) -> Result<Vec<Layout>, ListLayoutsError> {
        self.repository
            .list_for_user(user_id)
            .await
            .map_err(|e| ListLayoutsError::RepositoryError(e.to_string()))
    }
}
