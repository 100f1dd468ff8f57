//! Orders Domain
//!
//! Orders and order items, including the stock decrement that happens
//! atomically with order-item creation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! Creating an order item runs a single conditional update
//! (`quantity = quantity - n WHERE quantity >= n`) in the same
//! transaction as the insert, so concurrent orders cannot oversell a
//! product.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateOrder, CreateOrderItem, Order, OrderFilter, OrderItem, OrderItemFilter, OrderResponse,
    OrderStatus, UpdateOrder, UpdateOrderItem,
};
pub use postgres::PgOrdersRepository;
pub use repository::OrdersRepository;
pub use service::OrdersService;
