//! HTTP handlers for the orders API.
//!
//! Reads are open to any caller; the write router is wrapped in an auth
//! layer by the application.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{AppError, JwtClaims, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::models::{
    CreateOrder, CreateOrderItem, Order, OrderFilter, OrderItem, OrderItemFilter, OrderResponse,
    OrderStatus, UpdateOrder, UpdateOrderItem,
};
use crate::repository::OrdersRepository;
use crate::service::OrdersService;

/// OpenAPI documentation for the orders API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_orders,
        create_order,
        get_order,
        update_order,
        delete_order,
        list_order_items,
        create_order_item,
        get_order_item,
        update_order_item,
        delete_order_item,
    ),
    components(schemas(
        Order,
        OrderResponse,
        OrderStatus,
        CreateOrder,
        UpdateOrder,
        OrderItem,
        CreateOrderItem,
        UpdateOrderItem,
    )),
    tags(
        (name = "Orders", description = "Orders and order items")
    )
)]
pub struct ApiDoc;

/// Read-only order routes, open to any caller.
pub fn read_router<R: OrdersRepository + 'static>(service: OrdersService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(get_order))
        .route("/order-items", get(list_order_items))
        .route("/order-items/{id}", get(get_order_item))
        .with_state(shared_service)
}

/// Order write routes; the app restricts these to authenticated callers.
pub fn write_router<R: OrdersRepository + 'static>(service: OrdersService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}", put(update_order).delete(delete_order))
        .route("/order-items", post(create_order_item))
        .route(
            "/order-items/{id}",
            put(update_order_item).delete(delete_order_item),
        )
        .with_state(shared_service)
}

// ===== Orders =====

/// List orders
#[utoipa::path(
    get,
    path = "/orders",
    tag = "Orders",
    params(OrderFilter),
    responses(
        (status = 200, description = "List of orders", body = Vec<OrderResponse>)
    )
)]
async fn list_orders<R: OrdersRepository>(
    State(service): State<Arc<OrdersService<R>>>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = service.list_orders(filter).await?;
    Ok(Json(orders))
}

/// Create an order as the authenticated caller
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Orders",
    security(("bearer" = [])),
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 401, description = "Authentication required")
    )
)]
async fn create_order<R: OrdersRepository>(
    State(service): State<Arc<OrdersService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> Result<impl IntoResponse, AppError> {
    let user_id: Uuid = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

    let order = service.create_order(user_id, input).await?;
    let location = format!("/api/orders/{}", order.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(order),
    ))
}

/// Get an order with its items
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found")
    )
)]
async fn get_order<R: OrdersRepository>(
    State(service): State<Arc<OrdersService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = service.get_order(id).await?;
    Ok(Json(order))
}

/// Update an order
#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "Orders",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 404, description = "Order not found")
    )
)]
async fn update_order<R: OrdersRepository>(
    State(service): State<Arc<OrdersService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateOrder>,
) -> Result<Json<Order>, AppError> {
    let order = service.update_order(id, input).await?;
    Ok(Json(order))
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Orders",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, description = "Order not found")
    )
)]
async fn delete_order<R: OrdersRepository>(
    State(service): State<Arc<OrdersService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Order items =====

/// List order items
#[utoipa::path(
    get,
    path = "/order-items",
    tag = "Orders",
    params(OrderItemFilter),
    responses(
        (status = 200, description = "List of order items", body = Vec<OrderItem>)
    )
)]
async fn list_order_items<R: OrdersRepository>(
    State(service): State<Arc<OrdersService<R>>>,
    Query(filter): Query<OrderItemFilter>,
) -> Result<Json<Vec<OrderItem>>, AppError> {
    let items = service.list_order_items(filter).await?;
    Ok(Json(items))
}

/// Create an order item, decrementing product stock.
///
/// Fails with a structured 400 when the product's stock cannot cover
/// the requested quantity; stock is left unchanged in that case.
#[utoipa::path(
    post,
    path = "/order-items",
    tag = "Orders",
    security(("bearer" = [])),
    request_body = CreateOrderItem,
    responses(
        (status = 201, description = "Order item created", body = OrderItem),
        (status = 400, description = "Insufficient stock"),
        (status = 404, description = "Order or product not found")
    )
)]
async fn create_order_item<R: OrdersRepository>(
    State(service): State<Arc<OrdersService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateOrderItem>,
) -> Result<impl IntoResponse, AppError> {
    let item = service.create_order_item(input).await?;
    let location = format!("/api/order-items/{}", item.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(item),
    ))
}

/// Get an order item by ID
#[utoipa::path(
    get,
    path = "/order-items/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order item ID")),
    responses(
        (status = 200, description = "Order item found", body = OrderItem),
        (status = 404, description = "Order item not found")
    )
)]
async fn get_order_item<R: OrdersRepository>(
    State(service): State<Arc<OrdersService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderItem>, AppError> {
    let item = service.get_order_item(id).await?;
    Ok(Json(item))
}

/// Update an order item (does not touch product stock)
#[utoipa::path(
    put,
    path = "/order-items/{id}",
    tag = "Orders",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Order item ID")),
    request_body = UpdateOrderItem,
    responses(
        (status = 200, description = "Order item updated", body = OrderItem),
        (status = 404, description = "Order item not found")
    )
)]
async fn update_order_item<R: OrdersRepository>(
    State(service): State<Arc<OrdersService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateOrderItem>,
) -> Result<Json<OrderItem>, AppError> {
    let item = service.update_order_item(id, input).await?;
    Ok(Json(item))
}

/// Delete an order item
#[utoipa::path(
    delete,
    path = "/order-items/{id}",
    tag = "Orders",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Order item ID")),
    responses(
        (status = 204, description = "Order item deleted"),
        (status = 404, description = "Order item not found")
    )
)]
async fn delete_order_item<R: OrdersRepository>(
    State(service): State<Arc<OrdersService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_order_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
