use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::modules::dashboard::application::domain::entities::WidgetPreference;
use crate::modules::dashboard::application::ports::outgoing::widget_preference_repository::{
    NewWidgetPreference, WidgetPreferenceRepository, WidgetPreferenceRepositoryError,
};

// ====================== Create Widget Preference Request =============================
#[derive(Debug, Clone)]
pub struct CreateWidgetPreferenceRequest {
    widget_id: Uuid,
    widget_type: String,
    settings: JsonValue,
}

impl CreateWidgetPreferenceRequest {
    /// `widget_id` arrives as a string from the wire and must parse as a
    /// UUID before anything is persisted.
    pub fn new(
        widget_id: String,
        widget_type: String,
        settings: JsonValue,
    ) -> Result<Self, CreateWidgetPreferenceError> {
        let widget_id = Uuid::parse_str(widget_id.trim())
            .map_err(|_| CreateWidgetPreferenceError::InvalidWidgetId)?;

        let widget_type = widget_type.trim().to_string();
        if widget_type.is_empty() {
            return Err(CreateWidgetPreferenceError::EmptyWidgetType);
        }

        Ok(Self {
            widget_id,
            widget_type,
            settings,
        })
    }

    pub fn widget_id(&self) -> Uuid {
        self.widget_id
    }
}

// ====================== Create Widget Preference Error =============================
#[derive(Debug, Clone)]
pub enum CreateWidgetPreferenceError {
    InvalidWidgetId,
    EmptyWidgetType,
    WidgetIdTaken,
    RepositoryError(String),
}

impl std::fmt::Display for CreateWidgetPreferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateWidgetPreferenceError::InvalidWidgetId => {
                write!(f, "widget_id must be a valid UUID")
            }
            CreateWidgetPreferenceError::EmptyWidgetType => {
                write!(f, "widget_type cannot be empty")
            }
            CreateWidgetPreferenceError::WidgetIdTaken => {
                write!(f, "A preference for this widget_id already exists")
            }
            CreateWidgetPreferenceError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for CreateWidgetPreferenceError {}

// ====================== Create Widget Preference Use Case =============================
#[async_trait]
pub trait ICreateWidgetPreferenceUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        request: CreateWidgetPreferenceRequest,
    ) -> Result<WidgetPreference, CreateWidgetPreferenceError>;
}

#[derive(Clone)]
pub struct CreateWidgetPreferenceUseCase {
    repository: Arc<dyn WidgetPreferenceRepository>,
}

impl CreateWidgetPreferenceUseCase {
    pub fn new(repository: Arc<dyn WidgetPreferenceRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ICreateWidgetPreferenceUseCase for CreateWidgetPreferenceUseCase {
    async fn execute(
        &self,
        user_id: Uuid,
        request: CreateWidgetPreferenceRequest,
    ) -> Result<WidgetPreference, CreateWidgetPreferenceError> {
        self.repository
            .insert(NewWidgetPreference {
                user_id,
                widget_id: request.widget_id,
                widget_type: request.widget_type,
                settings: request.settings,
            })
            .await
            .map_err(|e| match e {
                WidgetPreferenceRepositoryError::WidgetIdTaken => {
                    CreateWidgetPreferenceError::WidgetIdTaken
                }
                other => CreateWidgetPreferenceError::RepositoryError(other.to_string()),
            })
    }
}
