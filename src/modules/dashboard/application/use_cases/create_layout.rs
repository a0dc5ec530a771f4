use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::modules::dashboard::application::domain::entities::Layout;
use crate::modules::dashboard::application::ports::outgoing::layout_repository::{
    LayoutRepository, NewLayout,
};

// ====================== Create Layout Request =============================
#[derive(Debug, Clone)]
pub struct CreateLayoutRequest {
    name: String,
    widgets: JsonValue,
}

impl CreateLayoutRequest {
    pub fn new(name: String, widgets: JsonValue) -> Result<Self, CreateLayoutError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(CreateLayoutError::EmptyName);
        }
        if !widgets.is_array() {
            return Err(CreateLayoutError::WidgetsNotArray);
        }
        Ok(Self { name, widgets })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// ====================== Create Layout Error =============================
#[derive(Debug, Clone)]
pub enum CreateLayoutError {
    EmptyName,
    WidgetsNotArray,
    RepositoryError(String),
}

impl std::fmt::Display for CreateLayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateLayoutError::EmptyName => write!(f, "Layout name cannot be empty"),
            CreateLayoutError::WidgetsNotArray => write!(f, "widgets must be a JSON array"),
            CreateLayoutError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for CreateLayoutError {}

// ====================== Create Layout Use Case =============================
#[async_trait]
pub trait ICreateLayoutUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        request: CreateLayoutRequest,
    ) -> Result<Layout, CreateLayoutError>;
}

#[derive(Clone)]
pub struct CreateLayoutUseCase {
    repository: Arc<dyn LayoutRepository>,
}

impl CreateLayoutUseCase {
    pub fn new(repository: Arc<dyn LayoutRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ICreateLayoutUseCase for CreateLayoutUseCase {
    async fn execute(
        &self,
        user_id: Uuid,
        request: CreateLayoutRequest,
    ) -> Result<Layout, CreateLayoutError> {
        self.repository
            .insert(NewLayout {
                user_id,
                name: request.name,
                widgets: request.widgets,
            })
            .await
            .map_err(|e| CreateLayoutError::RepositoryError(e.to_string()))
    }
}
