use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::modules::dashboard::application::domain::entities::Layout;

#[derive(Debug, Clone)]
pub struct NewLayout {
    pub user_id: Uuid,
    pub name: String,
    pub widgets: JsonValue,
}

#[derive(Debug, Clone)]
pub struct LayoutUpdate {
    pub name: String,
    pub widgets: JsonValue,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LayoutRepositoryError {
    #[error("Layout not found")]
    NotFound,

    /// The row exists but belongs to a different user.
    #[error("Layout owned by another user")]
    Forbidden,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait LayoutRepository: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Layout>, LayoutRepositoryError>;

    async fn insert(&self, data: NewLayout) -> Result<Layout, LayoutRepositoryError>;

    async fn find_owned(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
    ) -> Result<Layout, LayoutRepositoryError>;

    async fn update_owned(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
        update: LayoutUpdate,
    ) -> Result<Layout, LayoutRepositoryError>;

    async fn delete_owned(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), LayoutRepositoryError>;
}
