//! Orders service - business logic layer.

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{
    CreateOrder, CreateOrderItem, Order, OrderFilter, OrderItem, OrderItemFilter, OrderResponse,
    UpdateOrder, UpdateOrderItem,
};
use crate::repository::OrdersRepository;

/// Orders service providing business logic operations.
pub struct OrdersService<R: OrdersRepository> {
    repository: Arc<R>,
}

impl<R: OrdersRepository> OrdersService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    // ===== Orders =====

    /// Create an order owned by the authenticated caller.
    #[instrument(skip(self, input))]
    pub async fn create_order(&self, user_id: Uuid, input: CreateOrder) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        self.repository.create_order(Order::new(user_id, input)).await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: Uuid) -> OrderResult<OrderResponse> {
        self.repository
            .get_order_detail(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self, filter: OrderFilter) -> OrderResult<Vec<OrderResponse>> {
        self.repository.list_orders(filter).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_order(&self, id: Uuid, input: UpdateOrder) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        let mut order = self
            .repository
            .get_order(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))?;

        order.apply_update(input);

        self.repository.update_order(order).await
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: Uuid) -> OrderResult<()> {
        if !self.repository.delete_order(id).await? {
            return Err(OrderError::OrderNotFound(id));
        }
        Ok(())
    }

    // ===== Order items =====

    /// Create an order item.
    ///
    /// The repository decrements product stock in the same transaction
    /// as the insert; insufficient stock fails the whole operation and
    /// leaves the stock unchanged.
    #[instrument(skip(self, input), fields(order_id = %input.order_id, product_id = %input.product_id))]
    pub async fn create_order_item(&self, input: CreateOrderItem) -> OrderResult<OrderItem> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        if self.repository.get_order(input.order_id).await?.is_none() {
            return Err(OrderError::OrderNotFound(input.order_id));
        }

        self.repository
            .create_order_item(OrderItem::new(input))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_order_item(&self, id: Uuid) -> OrderResult<OrderItem> {
        self.repository
            .get_order_item(id)
            .await?
            .ok_or(OrderError::OrderItemNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_order_items(&self, filter: OrderItemFilter) -> OrderResult<Vec<OrderItem>> {
        self.repository.list_order_items(filter).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_order_item(
        &self,
        id: Uuid,
        input: UpdateOrderItem,
    ) -> OrderResult<OrderItem> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        let mut item = self
            .repository
            .get_order_item(id)
            .await?
            .ok_or(OrderError::OrderItemNotFound(id))?;

        item.apply_update(input);

        self.repository.update_order_item(item).await
    }

    #[instrument(skip(self))]
    pub async fn delete_order_item(&self, id: Uuid) -> OrderResult<()> {
        if !self.repository.delete_order_item(id).await? {
            return Err(OrderError::OrderItemNotFound(id));
        }
        Ok(())
    }
}

impl<R: OrdersRepository> Clone for OrdersService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use crate::repository::MockOrdersRepository;
    use mockall::predicate::eq;

    fn sample_order(id: Uuid) -> Order {
        Order {
            id,
            user_id: Uuid::now_v7(),
            address: "12 Main Street".to_string(),
            is_paid: false,
            total_price: 0,
            status: OrderStatus::Pending,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_order_item_passes_through() {
        let order_id = Uuid::now_v7();
        let product_id = Uuid::now_v7();

        let mut repo = MockOrdersRepository::new();
        repo.expect_get_order()
            .with(eq(order_id))
            .returning(move |id| Ok(Some(sample_order(id))));
        repo.expect_create_order_item()
            .withf(move |item| {
                item.order_id == order_id && item.product_id == product_id && item.quantity == 2
            })
            .times(1)
            .returning(Ok);

        let service = OrdersService::new(repo);
        let item = service
            .create_order_item(CreateOrderItem {
                order_id,
                product_id,
                quantity: 2,
                price: 1_999,
            })
            .await
            .unwrap();

        assert_eq!(item.quantity, 2);
    }

    #[tokio::test]
    async fn test_create_order_item_surfaces_insufficient_stock() {
        let order_id = Uuid::now_v7();

        let mut repo = MockOrdersRepository::new();
        repo.expect_get_order()
            .returning(move |id| Ok(Some(sample_order(id))));
        repo.expect_create_order_item().returning(|_| {
            Err(OrderError::InsufficientStock {
                available: 1,
                requested: 5,
            })
        });

        let service = OrdersService::new(repo);
        let result = service
            .create_order_item(CreateOrderItem {
                order_id,
                product_id: Uuid::now_v7(),
                quantity: 5,
                price: 1_999,
            })
            .await;

        assert!(matches!(
            result,
            Err(OrderError::InsufficientStock {
                available: 1,
                requested: 5
            })
        ));
    }

    #[tokio::test]
    async fn test_create_order_item_requires_existing_order() {
        let mut repo = MockOrdersRepository::new();
        repo.expect_get_order().returning(|_| Ok(None));

        let service = OrdersService::new(repo);
        let result = service
            .create_order_item(CreateOrderItem {
                order_id: Uuid::now_v7(),
                product_id: Uuid::now_v7(),
                quantity: 1,
                price: 100,
            })
            .await;

        assert!(matches!(result, Err(OrderError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_order_item_rejects_zero_quantity() {
        let repo = MockOrdersRepository::new();

        let service = OrdersService::new(repo);
        let result = service
            .create_order_item(CreateOrderItem {
                order_id: Uuid::now_v7(),
                product_id: Uuid::now_v7(),
                quantity: 0,
                price: 100,
            })
            .await;

        assert!(matches!(result, Err(OrderError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_order_status() {
        let order_id = Uuid::now_v7();

        let mut repo = MockOrdersRepository::new();
        repo.expect_get_order()
            .returning(move |id| Ok(Some(sample_order(id))));
        repo.expect_update_order()
            .withf(|order| order.status == OrderStatus::Completed)
            .returning(Ok);

        let service = OrdersService::new(repo);
        let order = service
            .update_order(
                order_id,
                UpdateOrder {
                    status: Some(OrderStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Completed);
    }
}
