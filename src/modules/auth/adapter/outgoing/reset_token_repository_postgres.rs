use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::PasswordResetToken;
use crate::modules::auth::application::ports::outgoing::reset_token_repository::{
    NewResetToken, ResetTokenRepository, ResetTokenRepositoryError,
};

use super::sea_orm_entity::password_reset_tokens::{
    ActiveModel as TokenActiveModel, Column as TokenColumn, Entity as TokenEntity,
    Model as TokenModel,
};

#[derive(Clone, Debug)]
pub struct ResetTokenRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ResetTokenRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_domain(model: TokenModel) -> PasswordResetToken {
        PasswordResetToken {
            id: model.id,
            user_id: model.user_id,
            token_hash: model.token_hash,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            expires_at: model.expires_at.with_timezone(&chrono::Utc),
            is_used: model.is_used,
        }
    }
}

#[async_trait]
impl ResetTokenRepository for ResetTokenRepositoryPostgres {
    async fn insert(
        &self,
        data: NewResetToken,
    ) -> Result<PasswordResetToken, ResetTokenRepositoryError> {
        let active_token = TokenActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(data.user_id),
            token_hash: Set(data.token_hash),
            is_used: Set(false),
            created_at: NotSet,
            expires_at: Set(data.expires_at.into()),
        };

        let inserted = active_token
            .insert(&*self.db)
            .await
            .map_err(|e| ResetTokenRepositoryError::DatabaseError(e.to_string()))?;

        Ok(Self::map_to_domain(inserted))
    }

    async fn find_latest_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PasswordResetToken>, ResetTokenRepositoryError> {
        let token = TokenEntity::find()
            .filter(TokenColumn::UserId.eq(user_id))
            .order_by_desc(TokenColumn::CreatedAt)
            .one(&*self.db)
            .await
            .map_err(|e| ResetTokenRepositoryError::DatabaseError(e.to_string()))?;

        Ok(token.map(Self::map_to_domain))
    }

    async fn mark_used(&self, token_id: Uuid) -> Result<(), ResetTokenRepositoryError> {
        let token = TokenEntity::find_by_id(token_id)
            .one(&*self.db)
            .await
            .map_err(|e| ResetTokenRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(ResetTokenRepositoryError::TokenNotFound)?;

        let mut active_token: TokenActiveModel = token.into();
        active_token.is_used = Set(true);

        active_token
            .update(&*self.db)
            .await
            .map_err(|e| ResetTokenRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
