use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::dashboard::application::ports::outgoing::widget_preference_repository::{
    WidgetPreferenceRepository, WidgetPreferenceRepositoryError,
};

// ====================== Delete Widget Preference Error =============================
#[derive(Debug, Clone)]
pub enum DeleteWidgetPreferenceError {
    NotFound,
    Forbidden,
    RepositoryError(String),
}

impl std::fmt::Display for DeleteWidgetPreferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteWidgetPreferenceError::NotFound => write!(f, "Widget preference not found"),
            DeleteWidgetPreferenceError::Forbidden => {
                write!(f, "Widget preference belongs to another user")
            }
            DeleteWidgetPreferenceError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DeleteWidgetPreferenceError {}

impl From<WidgetPreferenceRepositoryError> for DeleteWidgetPreferenceError {
    fn from(e: WidgetPreferenceRepositoryError) -> Self {
        match e {
            WidgetPreferenceRepositoryError::NotFound => DeleteWidgetPreferenceError::NotFound,
            WidgetPreferenceRepositoryError::Forbidden => DeleteWidgetPreferenceError::Forbidden,
            other => DeleteWidgetPreferenceError::RepositoryError(other.to_string()),
        }
    }
}

// ====================== Delete Widget Preference Use Case =============================
#[async_trait]
pub trait IDeleteWidgetPreferenceUseCase: Send + Sync {
    async fn execute(
        &self,
        widget_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DeleteWidgetPreferenceError>;
}

#[derive(Clone)]
pub struct DeleteWidgetPreferenceUseCase {
    repository: Arc<dyn WidgetPreferenceRepository>,
}

impl DeleteWidgetPreferenceUseCase {
    pub fn new(repository: Arc<dyn WidgetPreferenceRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl IDeleteWidgetPreferenceUseCase for DeleteWidgetPreferenceUseCase {
    async fn execute(
        &self,
        widget_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), DeleteWidgetPreferenceError> {
        Ok(self.repository.delete_owned(widget_id, user_id).await?)
    }
}
