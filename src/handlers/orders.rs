use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{BookItem, Order};
use crate::domain::ports::Bookstore;
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub book_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: Uuid,
    pub books: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub book_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub user_id: Uuid,
    /// Decimal total as a string to avoid floating-point issues, e.g. "249.99"
    pub total_payment: String,
    pub books: Vec<OrderItemResponse>,
    pub status: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            order_id: order.id,
            user_id: order.user_id,
            total_payment: order.total_payment.to_string(),
            books: order
                .items
                .into_iter()
                .map(|item| OrderItemResponse {
                    book_id: item.book_id,
                    quantity: item.quantity,
                })
                .collect(),
            status: order.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdersFilter {
    pub user_id: Uuid,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Places an order. Validation and stock reservation run inside a single
/// transaction, so a rejected order never decrements any stock.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = OrderResponse),
        (status = 400, description = "Validation failure, as {\"fieldErrors\": [...]}"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order<S: Bookstore>(
    state: web::Data<AppState<S>>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let order = web::block(move || {
        let items: Vec<BookItem> = body
            .books
            .iter()
            .map(|item| BookItem {
                book_id: item.book_id,
                quantity: item.quantity,
            })
            .collect();
        state.orders.create_order(body.user_id, items)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order<S: Bookstore>(
    state: web::Data<AppState<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || state.orders.get_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match order {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(DomainError::OrderNotExist.into()),
    }
}

/// GET /api/orders
///
/// Returns all orders, newest first.
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_all_orders<S: Bookstore>(
    state: web::Data<AppState<S>>,
) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || state.orders.get_all_orders())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let responses: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// GET /api/orders/filter?userId={userId}
///
/// Returns one user's orders, newest first. An unknown user is a
/// validation failure on `userId`, not a 404: the order list is the
/// resource here and the user id is merely a filter value.
#[utoipa::path(
    get,
    path = "/api/orders/filter",
    params(
        ("userId" = Uuid, Query, description = "User UUID to filter by"),
    ),
    responses(
        (status = 200, description = "The user's orders", body = [OrderResponse]),
        (status = 400, description = "Unknown user, as {\"fieldErrors\": [...]}"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_orders_by_user<S: Bookstore>(
    state: web::Data<AppState<S>>,
    query: web::Query<OrdersFilter>,
) -> Result<HttpResponse, AppError> {
    let user_id = query.into_inner().user_id;

    let orders = web::block(move || state.orders.get_orders_by_user(user_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let responses: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// POST /api/orders/{id}/pay
///
/// Marks a pending order as paid. Paying twice is refused with a field
/// error on `id`; a missing order is a 404.
#[utoipa::path(
    post,
    path = "/api/orders/{id}/pay",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order paid", body = OrderResponse),
        (status = 400, description = "Order was already paid, as {\"fieldErrors\": [...]}"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn pay_order<S: Bookstore>(
    state: web::Data<AppState<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || state.orders.pay_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// DELETE /api/orders/{id}
///
/// Cancels an order, returning its reserved stock to the catalog.
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 204, description = "Order cancelled"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order<S: Bookstore>(
    state: web::Data<AppState<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    web::block(move || state.orders.cancel_order(order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::NoContent().finish())
}
