use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::OrderStatus;

// ===== Orders Entity =====

pub mod orders {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "orders")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        #[sea_orm(column_type = "String(StringLen::N(50))")]
        pub address: String,
        pub is_paid: bool,
        pub total_price: i64,
        pub status: OrderStatus,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::order_items::Entity")]
        OrderItems,
        #[sea_orm(
            belongs_to = "domain_users::entity::users::Entity",
            from = "Column::UserId",
            to = "domain_users::entity::users::Column::Id"
        )]
        User,
    }

    impl Related<super::order_items::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::OrderItems.def()
        }
    }

    impl Related<domain_users::entity::users::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Order {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                user_id: model.user_id,
                address: model.address,
                is_paid: model.is_paid,
                total_price: model.total_price,
                status: model.status,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<crate::models::Order> for ActiveModel {
        fn from(order: crate::models::Order) -> Self {
            ActiveModel {
                id: Set(order.id),
                user_id: Set(order.user_id),
                address: Set(order.address),
                is_paid: Set(order.is_paid),
                total_price: Set(order.total_price),
                status: Set(order.status),
                created_at: Set(order.created_at.into()),
                updated_at: Set(order.updated_at.into()),
            }
        }
    }
}

// ===== Order Items Entity =====

pub mod order_items {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "order_items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub order_id: Uuid,
        pub product_id: Uuid,
        pub quantity: i32,
        pub price: i64,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::orders::Entity",
            from = "Column::OrderId",
            to = "super::orders::Column::Id"
        )]
        Order,
        #[sea_orm(
            belongs_to = "domain_catalog::entity::products::Entity",
            from = "Column::ProductId",
            to = "domain_catalog::entity::products::Column::Id"
        )]
        Product,
    }

    impl Related<super::orders::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Order.def()
        }
    }

    impl Related<domain_catalog::entity::products::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::OrderItem {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                order_id: model.order_id,
                product_id: model.product_id,
                quantity: model.quantity,
                price: model.price,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<crate::models::OrderItem> for ActiveModel {
        fn from(item: crate::models::OrderItem) -> Self {
            ActiveModel {
                id: Set(item.id),
                order_id: Set(item.order_id),
                product_id: Set(item.product_id),
                quantity: Set(item.quantity),
                price: Set(item.price),
                created_at: Set(item.created_at.into()),
                updated_at: Set(item.updated_at.into()),
            }
        }
    }
}

pub use order_items::Entity as OrderItemsEntity;
pub use orders::Entity as OrdersEntity;
