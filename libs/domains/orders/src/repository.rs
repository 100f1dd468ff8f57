use async_trait::async_trait;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::{
    Order, OrderFilter, OrderItem, OrderItemFilter, OrderResponse,
};

/// Repository trait for order persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    // ===== Orders =====

    async fn create_order(&self, order: Order) -> OrderResult<Order>;

    async fn get_order(&self, id: Uuid) -> OrderResult<Option<Order>>;

    /// Order with its owner's username and nested items
    async fn get_order_detail(&self, id: Uuid) -> OrderResult<Option<OrderResponse>>;

    async fn list_orders(&self, filter: OrderFilter) -> OrderResult<Vec<OrderResponse>>;

    async fn update_order(&self, order: Order) -> OrderResult<Order>;

    async fn delete_order(&self, id: Uuid) -> OrderResult<bool>;

    // ===== Order items =====

    /// Create an order item, decrementing the product's stock in the
    /// same transaction. Fails with `InsufficientStock` (and rolls the
    /// transaction back) when the product cannot cover the quantity.
    async fn create_order_item(&self, item: OrderItem) -> OrderResult<OrderItem>;

    async fn get_order_item(&self, id: Uuid) -> OrderResult<Option<OrderItem>>;

    async fn list_order_items(&self, filter: OrderItemFilter) -> OrderResult<Vec<OrderItem>>;

    async fn update_order_item(&self, item: OrderItem) -> OrderResult<OrderItem>;

    async fn delete_order_item(&self, id: Uuid) -> OrderResult<bool>;
}
