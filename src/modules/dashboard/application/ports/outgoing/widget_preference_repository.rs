use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::modules::dashboard::application::domain::entities::WidgetPreference;

#[derive(Debug, Clone)]
pub struct NewWidgetPreference {
    pub user_id: Uuid,
    pub widget_id: Uuid,
    pub widget_type: String,
    pub settings: JsonValue,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum WidgetPreferenceRepositoryError {
    #[error("Widget preference not found")]
    NotFound,

    /// The widget_id exists but belongs to a different user.
    #[error("Widget preference owned by another user")]
    Forbidden,

    /// widget_id is unique across all users.
    #[error("Widget id already registered")]
    WidgetIdTaken,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait WidgetPreferenceRepository: Send + Sync {
    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<WidgetPreference>, WidgetPreferenceRepositoryError>;

    async fn insert(
        &self,
        data: NewWidgetPreference,
    ) -> Result<WidgetPreference, WidgetPreferenceRepositoryError>;

    /// Looks up by the client-supplied widget_id, not the row id.
    async fn update_settings(
        &self,
        widget_id: Uuid,
        user_id: Uuid,
        settings: JsonValue,
    ) -> Result<WidgetPreference, WidgetPreferenceRepositoryError>;

    async fn delete_owned(
        &self,
        widget_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), WidgetPreferenceRepositoryError>;
}
