use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::dashboard::application::domain::entities::WidgetPreference;
use crate::modules::dashboard::application::ports::outgoing::widget_preference_repository::{
    NewWidgetPreference, WidgetPreferenceRepository, WidgetPreferenceRepositoryError,
};

use super::sea_orm_entity::widget_preferences::{
    ActiveModel as PrefActiveModel, Column as PrefColumn, Entity as PrefEntity, Model as PrefModel,
};

#[derive(Clone, Debug)]
pub struct WidgetPreferenceRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl WidgetPreferenceRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_domain(model: PrefModel) -> WidgetPreference {
        WidgetPreference {
            id: model.id,
            user_id: model.user_id,
            widget_id: model.widget_id,
            widget_type: model.widget_type,
            settings: model.settings,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }

    async fn find_checked(
        &self,
        widget_id: Uuid,
        user_id: Uuid,
    ) -> Result<PrefModel, WidgetPreferenceRepositoryError> {
        let model = PrefEntity::find()
            .filter(PrefColumn::WidgetId.eq(widget_id))
            .one(&*self.db)
            .await
            .map_err(|e| WidgetPreferenceRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(WidgetPreferenceRepositoryError::NotFound)?;

        if model.user_id != user_id {
            return Err(WidgetPreferenceRepositoryError::Forbidden);
        }

        Ok(model)
    }
}

#[async_trait]
impl WidgetPreferenceRepository for WidgetPreferenceRepositoryPostgres {
    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<WidgetPreference>, WidgetPreferenceRepositoryError> {
        let models = PrefEntity::find()
            .filter(PrefColumn::UserId.eq(user_id))
            .order_by_asc(PrefColumn::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| WidgetPreferenceRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Self::map_to_domain).collect())
    }

    async fn insert(
        &self,
        data: NewWidgetPreference,
    ) -> Result<WidgetPreference, WidgetPreferenceRepositoryError> {
        let now = chrono::Utc::now();
        let active = PrefActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(data.user_id),
            widget_id: Set(data.widget_id),
            widget_type: Set(data.widget_type),
            settings: Set(data.settings),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        // The unique index on widget_id is the arbiter; racing inserts
        // surface as a constraint violation.
        let inserted = active.insert(&*self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                WidgetPreferenceRepositoryError::WidgetIdTaken
            }
            _ => WidgetPreferenceRepositoryError::DatabaseError(e.to_string()),
        })?;

        Ok(Self::map_to_domain(inserted))
    }

    async fn update_settings(
        &self,
        widget_id: Uuid,
        user_id: Uuid,
        settings: JsonValue,
    ) -> Result<WidgetPreference, WidgetPreferenceRepositoryError> {
        let existing = self.find_checked(widget_id, user_id).await?;

        let mut active: PrefActiveModel = existing.into();
        active.settings = Set(settings);
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active
            .update(&*self.db)
            .await
            .map_err(|e| WidgetPreferenceRepositoryError::DatabaseError(e.to_string()))?;

        Ok(Self::map_to_domain(updated))
    }

    async fn delete_owned(
        &self,
        widget_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), WidgetPreferenceRepositoryError> {
        let existing = self.find_checked(widget_id, user_id).await?;

        existing
            .delete(&*self.db)
            .await
            .map_err(|e| WidgetPreferenceRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
