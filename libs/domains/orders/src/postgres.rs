use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Statement, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::{OrderItemsEntity, OrdersEntity, order_items, orders};
use crate::error::{OrderError, OrderResult};
use crate::models::{
    Order, OrderFilter, OrderItem, OrderItemFilter, OrderResponse, OrderStatus,
};
use crate::repository::OrdersRepository;

/// PostgreSQL implementation of OrdersRepository
#[derive(Clone)]
pub struct PgOrdersRepository {
    db: DatabaseConnection,
}

impl PgOrdersRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn items_for(&self, order_id: Uuid) -> OrderResult<Vec<OrderItem>> {
        let items = OrderItemsEntity::find()
            .filter(order_items::Column::OrderId.eq(order_id))
            .order_by_asc(order_items::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(items)
    }
}

#[derive(FromQueryResult)]
struct OrderRow {
    id: Uuid,
    username: String,
    address: String,
    is_paid: bool,
    total_price: i64,
    status: OrderStatus,
    created_at: sea_orm::prelude::DateTimeWithTimeZone,
}

fn order_rows_query() -> sea_orm::Select<OrdersEntity> {
    OrdersEntity::find()
        .select_only()
        .column(orders::Column::Id)
        .column(orders::Column::Address)
        .column(orders::Column::IsPaid)
        .column(orders::Column::TotalPrice)
        .column(orders::Column::Status)
        .column(orders::Column::CreatedAt)
        .column_as(domain_users::entity::users::Column::Username, "username")
        .join(JoinType::InnerJoin, orders::Relation::User.def())
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    // ===== Orders =====

    async fn create_order(&self, order: Order) -> OrderResult<Order> {
        let model: orders::ActiveModel = order.into();
        let created = model.insert(&self.db).await?;

        tracing::info!(order_id = %created.id, user_id = %created.user_id, "New order created");
        Ok(created.into())
    }

    async fn get_order(&self, id: Uuid) -> OrderResult<Option<Order>> {
        let result = OrdersEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn get_order_detail(&self, id: Uuid) -> OrderResult<Option<OrderResponse>> {
        let Some(row) = order_rows_query()
            .filter(orders::Column::Id.eq(id))
            .into_model::<OrderRow>()
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let items = self.items_for(row.id).await?;

        Ok(Some(OrderResponse {
            id: row.id,
            username: row.username,
            address: row.address,
            is_paid: row.is_paid,
            total_price: row.total_price,
            status: row.status,
            items,
            created_at: row.created_at.into(),
        }))
    }

    async fn list_orders(&self, filter: OrderFilter) -> OrderResult<Vec<OrderResponse>> {
        let mut query = order_rows_query();

        if let Some(ref search) = filter.search {
            query = query.filter(
                Expr::col((domain_users::entity::UsersEntity, domain_users::entity::users::Column::Username))
                    .ilike(format!("%{}%", search)),
            );
        }

        if let Some(is_paid) = filter.is_paid {
            query = query.filter(orders::Column::IsPaid.eq(is_paid));
        }

        let query = match filter.ordering.as_deref() {
            Some("-created_at") => query.order_by_desc(orders::Column::CreatedAt),
            _ => query.order_by_asc(orders::Column::CreatedAt),
        };

        let rows = query.into_model::<OrderRow>().all(&self.db).await?;

        let mut responses = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.items_for(row.id).await?;
            responses.push(OrderResponse {
                id: row.id,
                username: row.username,
                address: row.address,
                is_paid: row.is_paid,
                total_price: row.total_price,
                status: row.status,
                items,
                created_at: row.created_at.into(),
            });
        }

        Ok(responses)
    }

    async fn update_order(&self, order: Order) -> OrderResult<Order> {
        let id = order.id;
        let model: orders::ActiveModel = order.into();

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => OrderError::OrderNotFound(id),
            other => OrderError::Database(other),
        })?;

        Ok(updated.into())
    }

    async fn delete_order(&self, id: Uuid) -> OrderResult<bool> {
        let result = OrdersEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    // ===== Order items =====

    async fn create_order_item(&self, item: OrderItem) -> OrderResult<OrderItem> {
        let txn = self.db.begin().await?;

        let product = domain_catalog::entity::ProductsEntity::find_by_id(item.product_id)
            .one(&txn)
            .await?
            .ok_or(OrderError::ProductNotFound(item.product_id))?;

        // Conditional decrement: zero rows affected means the stock
        // cannot cover the requested quantity.
        let result = txn
            .execute_raw(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                    UPDATE products
                    SET quantity = quantity - $2, updated_at = NOW()
                    WHERE id = $1 AND quantity >= $2
                "#,
                [item.product_id.into(), item.quantity.into()],
            ))
            .await?;

        if result.rows_affected() == 0 {
            txn.rollback().await?;
            return Err(OrderError::InsufficientStock {
                available: product.quantity,
                requested: item.quantity,
            });
        }

        let model: order_items::ActiveModel = item.into();
        let created = model.insert(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            order_item_id = %created.id,
            product_id = %created.product_id,
            quantity = created.quantity,
            "Order item created, stock decremented"
        );
        Ok(created.into())
    }

    async fn get_order_item(&self, id: Uuid) -> OrderResult<Option<OrderItem>> {
        let result = OrderItemsEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn list_order_items(&self, filter: OrderItemFilter) -> OrderResult<Vec<OrderItem>> {
        let mut query = OrderItemsEntity::find();

        if let Some(order_id) = filter.order_id {
            query = query.filter(order_items::Column::OrderId.eq(order_id));
        }

        let items = query
            .order_by_asc(order_items::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }

    async fn update_order_item(&self, item: OrderItem) -> OrderResult<OrderItem> {
        let id = item.id;
        let model: order_items::ActiveModel = item.into();

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => OrderError::OrderItemNotFound(id),
            other => OrderError::Database(other),
        })?;

        Ok(updated.into())
    }

    async fn delete_order_item(&self, id: Uuid) -> OrderResult<bool> {
        let result = OrderItemsEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
