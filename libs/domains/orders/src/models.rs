use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Order lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been placed but not fulfilled
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Order has been fulfilled
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address: String,
    pub is_paid: bool,
    /// Total price in cents
    pub total_price: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order representation carrying the owner's username and nested items
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub username: String,
    pub address: String,
    pub is_paid: bool,
    pub total_price: i64,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating an order; the owner is the authenticated caller
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    #[validate(length(min = 1, max = 50))]
    pub address: String,
    #[serde(default)]
    pub is_paid: bool,
    /// Total price in cents
    #[validate(range(min = 0))]
    #[serde(default)]
    pub total_price: i64,
}

/// DTO for updating an order
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrder {
    #[validate(length(min = 1, max = 50))]
    pub address: Option<String>,
    pub is_paid: Option<bool>,
    #[validate(range(min = 0))]
    pub total_price: Option<i64>,
    pub status: Option<OrderStatus>,
}

/// Query filters for listing orders
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct OrderFilter {
    /// Case-insensitive substring match on the owner's username
    pub search: Option<String>,
    pub is_paid: Option<bool>,
    /// Field to order by; `-` prefix for descending (created_at)
    pub ordering: Option<String>,
}

/// Order item entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit price in cents at order time
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating an order item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrderItem {
    pub order_id: Uuid,
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Unit price in cents
    #[validate(range(min = 0))]
    pub price: i64,
}

/// DTO for updating an order item.
///
/// Stock is only adjusted at creation time; quantity updates do not
/// touch product stock.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderItem {
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
}

/// Query filters for listing order items
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct OrderItemFilter {
    /// Restrict to items of this order
    pub order_id: Option<Uuid>,
}

impl Order {
    pub fn new(user_id: Uuid, input: CreateOrder) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            address: input.address,
            is_paid: input.is_paid,
            total_price: input.total_price,
            status: OrderStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateOrder) {
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(is_paid) = update.is_paid {
            self.is_paid = is_paid;
        }
        if let Some(total_price) = update.total_price {
            self.total_price = total_price;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

impl OrderItem {
    pub fn new(input: CreateOrderItem) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            order_id: input.order_id,
            product_id: input.product_id,
            quantity: input.quantity,
            price: input.price,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateOrderItem) {
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        self.updated_at = Utc::now();
    }

    /// Line total in cents
    pub fn total(&self) -> i64 {
        self.quantity as i64 * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_serialization() {
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert_eq!(OrderStatus::Completed.to_string(), "completed");
        assert_eq!("completed".parse::<OrderStatus>().unwrap(), OrderStatus::Completed);
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_order_item_total() {
        let item = OrderItem::new(CreateOrderItem {
            order_id: Uuid::now_v7(),
            product_id: Uuid::now_v7(),
            quantity: 3,
            price: 1_250,
        });
        assert_eq!(item.total(), 3_750);
    }

    #[test]
    fn test_new_order_defaults_to_pending() {
        let order = Order::new(
            Uuid::now_v7(),
            CreateOrder {
                address: "12 Main Street".to_string(),
                is_paid: false,
                total_price: 0,
            },
        );
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(!order.is_paid);
    }
}
