use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub mod users {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(column_type = "String(StringLen::N(150))", unique)]
        pub username: String,
        pub password_hash: String,
        pub is_admin: bool,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::User {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                username: model.username,
                password_hash: model.password_hash,
                is_admin: model.is_admin,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<crate::models::User> for ActiveModel {
        fn from(user: crate::models::User) -> Self {
            ActiveModel {
                id: Set(user.id),
                username: Set(user.username),
                password_hash: Set(user.password_hash),
                is_admin: Set(user.is_admin),
                created_at: Set(user.created_at.into()),
                updated_at: Set(user.updated_at.into()),
            }
        }
    }
}

pub use users::Entity as UsersEntity;
