use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::dashboard::application::domain::entities::WidgetPreference;
use crate::modules::dashboard::application::ports::outgoing::widget_preference_repository::WidgetPreferenceRepository;

// ====================== List Widget Preferences Error =============================
#[derive(Debug, Clone)]
pub enum ListWidgetPreferencesError {
    RepositoryError(String),
}

impl std::fmt::Display for ListWidgetPreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListWidgetPreferencesError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ListWidgetPreferencesError {}

// ====================== List Widget Preferences Use Case =============================
#[async_trait]
pub trait IListWidgetPreferencesUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<WidgetPreference>, ListWidgetPreferencesError>;
}

#[derive(Clone)]
pub struct ListWidgetPreferencesUseCase {
    repository: Arc<dyn WidgetPreferenceRepository>,
}

impl ListWidgetPreferencesUseCase {
    pub fn new(repository: Arc<dyn WidgetPreferenceRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl IListWidgetPreferencesUseCase for ListWidgetPreferencesUseCase {
    async fn execute(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<WidgetPreference>, ListWidgetPreferencesError> {
        self.repository
            .list_for_user(user_id)
            .await
            .map_err(|e| ListWidgetPreferencesError::RepositoryError(e.to_string()))
    }
}
