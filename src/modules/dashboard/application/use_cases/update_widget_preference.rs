use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::modules::dashboard::application::domain::entities::WidgetPreference;
use crate::modules::dashboard::application::ports::outgoing::widget_preference_repository::{
    WidgetPreferenceRepository, WidgetPreferenceRepositoryError,
};

// ====================== Update Widget Preference Error =============================
#[derive(Debug, Clone)]
pub enum UpdateWidgetPreferenceError {
    NotFound,
    Forbidden,
    RepositoryError(String),
}

impl std::fmt::Display for UpdateWidgetPreferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateWidgetPreferenceError::NotFound => write!(f, "Widget preference not found"),
            UpdateWidgetPreferenceError::Forbidden => {
                write!(f, "Widget preference belongs to another user")
            }
            UpdateWidgetPreferenceError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for UpdateWidgetPreferenceError {}

impl From<WidgetPreferenceRepositoryError> for UpdateWidgetPreferenceError {
    fn from(e: WidgetPreferenceRepositoryError) -> Self {
        match e {
            WidgetPreferenceRepositoryError::NotFound => UpdateWidgetPreferenceError::NotFound,
            WidgetPreferenceRepositoryError::Forbidden => UpdateWidgetPreferenceError::Forbidden,
            other => UpdateWidgetPreferenceError::RepositoryError(other.to_string()),
        }
    }
}

// ====================== Update Widget Preference Use Case =============================
#[async_trait]
pub trait IUpdateWidgetPreferenceUseCase: Send + Sync {
    async fn execute(
        &self,
        widget_id: Uuid,
        user_id: Uuid,
        settings: JsonValue,
    ) -> Result<WidgetPreference, UpdateWidgetPreferenceError>;
}

#[derive(Clone)]
pub struct UpdateWidgetPreferenceUseCase {
    repository: Arc<dyn WidgetPreferenceRepository>,
}

impl UpdateWidgetPreferenceUseCase {
    pub fn new(repository: Arc<dyn WidgetPreferenceRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl IUpdateWidgetPreferenceUseCase for UpdateWidgetPreferenceUseCase {
    async fn execute(
        &self,
        widget_id: Uuid,
        user_id: Uuid,
        settings: JsonValue,
    ) -> Result<WidgetPreference, UpdateWidgetPreferenceError> {
        Ok(self
            .repository
            .update_settings(widget_id, user_id, settings)
            .await?)
    }
}
