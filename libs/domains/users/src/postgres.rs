use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use crate::entity::{UsersEntity, users};
use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let username = user.username.clone();
        let model: users::ActiveModel = user.into();

        let created = model.insert(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
                UserError::DuplicateUsername(username.clone())
            } else {
                UserError::Database(e)
            }
        })?;

        tracing::info!(user_id = %created.id, username = %created.username, "Created user");
        Ok(created.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let user = UsersEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(user)
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let user = UsersEntity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(user)
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        let count = UsersEntity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
