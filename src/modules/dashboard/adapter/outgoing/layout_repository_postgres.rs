use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::dashboard::application::domain::entities::Layout;
use crate::modules::dashboard::application::ports::outgoing::layout_repository::{
    LayoutRepository, LayoutRepositoryError, LayoutUpdate, NewLayout,
};

use super::sea_orm_entity::layouts::{
    ActiveModel as LayoutActiveModel, Column as LayoutColumn, Entity as LayoutEntity,
    Model as LayoutModel,
};

#[derive(Clone, Debug)]
pub struct LayoutRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl LayoutRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_domain(model: LayoutModel) -> Layout {
        Layout {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            widgets: model.widgets,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }

    /// Ownership check is separate from existence so the web layer can
    /// distinguish 403 from 404.
    async fn find_checked(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
    ) -> Result<LayoutModel, LayoutRepositoryError> {
        let model = LayoutEntity::find_by_id(layout_id)
            .one(&*self.db)
            .await
            .map_err(|e| LayoutRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(LayoutRepositoryError::NotFound)?;

        if model.user_id != user_id {
            return Err(LayoutRepositoryError::Forbidden);
        }

        Ok(model)
    }
}

#[async_trait]
impl LayoutRepository for LayoutRepositoryPostgres {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Layout>, LayoutRepositoryError> {
        let models = LayoutEntity::find()
            .filter(LayoutColumn::UserId.eq(user_id))
            .order_by_asc(LayoutColumn::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| LayoutRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Self::map_to_domain).collect())
    }

    async fn insert(&self, data: NewLayout) -> Result<Layout, LayoutRepositoryError> {
        let now = chrono::Utc::now();
        let active = LayoutActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(data.user_id),
            name: Set(data.name),
            widgets: Set(data.widgets),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = active
            .insert(&*self.db)
            .await
            .map_err(|e| LayoutRepositoryError::DatabaseError(e.to_string()))?;

        Ok(Self::map_to_domain(inserted))
    }

    async fn find_owned(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
    ) -> Result<Layout, LayoutRepositoryError> {
        let model = self.find_checked(layout_id, user_id).await?;
        Ok(Self::map_to_domain(model))
    }

    async fn update_owned(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
        update: LayoutUpdate,
    ) -> Result<Layout, LayoutRepositoryError> {
        let existing = self.find_checked(layout_id, user_id).await?;

        let mut active: LayoutActiveModel = existing.into();
        active.name = Set(update.name);
        active.widgets = Set(update.widgets);
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active
            .update(&*self.db)
            .await
            .map_err(|e| LayoutRepositoryError::DatabaseError(e.to_string()))?;

        Ok(Self::map_to_domain(updated))
    }

    async fn delete_owned(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), LayoutRepositoryError> {
        let existing = self.find_checked(layout_id, user_id).await?;

        existing
            .delete(&*self.db)
            .await
            .map_err(|e| LayoutRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
