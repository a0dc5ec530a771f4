use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::modules::dashboard::application::domain::entities::Layout;
use crate::modules::dashboard::application::ports::outgoing::layout_repository::{
    LayoutRepository, LayoutRepositoryError, LayoutUpdate,
};

// ====================== Update Layout Request =============================
#[derive(Debug, Clone)]
pub struct UpdateLayoutRequest {
    name: String,
    widgets: JsonValue,
}

impl UpdateLayoutRequest {
    pub fn new(name: String, widgets: JsonValue) -> Result<Self, UpdateLayoutError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(UpdateLayoutError::EmptyName);
        }
        if !widgets.is_array() {
            return Err(UpdateLayoutError::WidgetsNotArray);
        }
        Ok(Self { name, widgets })
    }
}

// ====================== Update Layout Error =============================
#[derive(Debug, Clone)]
pub enum UpdateLayoutError {
    EmptyName,
    WidgetsNotArray,
    NotFound,
    Forbidden,
    RepositoryError(String),
}

impl std::fmt::Display for UpdateLayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateLayoutError::EmptyName => write!(f, "Layout name cannot be empty"),
            UpdateLayoutError::WidgetsNotArray => write!(f, "widgets must be a JSON array"),
            UpdateLayoutError::NotFound => write!(f, "Layout not found"),
            UpdateLayoutError::Forbidden => write!(f, "Layout belongs to another user"),
            UpdateLayoutError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UpdateLayoutError {}

impl From<LayoutRepositoryError> for UpdateLayoutError {
    fn from(e: LayoutRepositoryError) -> Self {
        match e {
            LayoutRepositoryError::NotFound => UpdateLayoutError::NotFound,
            LayoutRepositoryError::Forbidden => UpdateLayoutError::Forbidden,
            LayoutRepositoryError::DatabaseError(msg) => UpdateLayoutError::RepositoryError(msg),
        }
    }
}

// ====================== Update Layout Use Case =============================
#[async_trait]
pub trait IUpdateLayoutUseCase: Send + Sync {
    async fn execute(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
        request: UpdateLayoutRequest,
    ) -> Result<Layout, UpdateLayoutError>;
}

#[derive(Clone)]
pub struct UpdateLayoutUseCase {
    repository: Arc<dyn LayoutRepository>,
}

impl UpdateLayoutUseCase {
    pub fn new(repository: Arc<dyn LayoutRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl IUpdateLayoutUseCase for UpdateLayoutUseCase {
    async fn execute(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
        request: UpdateLayoutRequest,
    ) -> Result<Layout, UpdateLayoutError> {
        Ok(self
            .repository
            .update_owned(
                layout_id,
                user_id,
                LayoutUpdate {
                    name: request.name,
                    widgets: request.widgets,
                },
            )
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::stubs::InMemoryLayoutRepository;
    use serde_json::json;

    #[test]
    fn test_request_rejects_non_array_widgets() {
        let result = UpdateLayoutRequest::new("Desk".to_string(), json!("not-an-array"));

        assert!(matches!(result, Err(UpdateLayoutError::WidgetsNotArray)));
    }

    #[tokio::test]
    async fn test_update_layout_success() {
        let user_id = Uuid::new_v4();
        let repository = Arc::new(InMemoryLayoutRepository::default());
        let layout_id = repository.seed(user_id, "Desk", json!([]));

        let use_case = UpdateLayoutUseCase::new(repository);

        let request =
            UpdateLayoutRequest::new("Renamed".to_string(), json!([{"type": "news"}])).unwrap();

        let layout = use_case.execute(layout_id, user_id, request).await.unwrap();

        assert_eq!(layout.name, "Renamed");
        assert_eq!(layout.widgets, json!([{"type": "news"}]));
    }

    #[tokio::test]
    async fn test_update_layout_other_users_row_is_forbidden() {
        let repository = Arc::new(InMemoryLayoutRepository::default());
        let layout_id = repository.seed(Uuid::new_v4(), "Desk", json!([]));

        let use_case = UpdateLayoutUseCase::new(repository);

        let request = UpdateLayoutRequest::new("Renamed".to_string(), json!([])).unwrap();

        let result = use_case.execute(layout_id, Uuid::new_v4(), request).await;

        assert!(matches!(result, Err(UpdateLayoutError::Forbidden)));
    }

    #[tokio::test]
    async fn test_update_layout_unknown_id() {
        let use_case = UpdateLayoutUseCase::new(Arc::new(InMemoryLayoutRepository::default()));

        let request = UpdateLayoutRequest::new("Renamed".to_string(), json!([])).unwrap();

        let result = use_case
            .execute(Uuid::new_v4(), Uuid::new_v4(), request)
            .await;

        assert!(matches!(result, Err(UpdateLayoutError::NotFound)));
    }
}
