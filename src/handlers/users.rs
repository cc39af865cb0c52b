use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::Bookstore;
use crate::domain::user::{NewUser, User};
use crate::errors::AppError;
use crate::handlers::orders::OrderResponse;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation failure, as {\"fieldErrors\": [...]}"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn add_user<S: Bookstore>(
    state: web::Data<AppState<S>>,
    body: web::Json<UserRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let user = web::block(move || state.users.add_user(NewUser { name: body.name }))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// GET /api/users/{id}
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User UUID"),
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn get_user<S: Bookstore>(
    state: web::Data<AppState<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let user = web::block(move || state.users.get_user(user_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(UserResponse::from(user))),
        None => Err(DomainError::UserNotExist.into()),
    }
}

/// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users, sorted by name", body = [UserResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn get_all_users<S: Bookstore>(
    state: web::Data<AppState<S>>,
) -> Result<HttpResponse, AppError> {
    let users = web::block(move || state.users.get_all_users())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// GET /api/users/{id}/orders
///
/// The same listing as `/api/orders/filter`, addressed through the user
/// resource.
#[utoipa::path(
    get,
    path = "/api/users/{id}/orders",
    params(
        ("id" = Uuid, Path, description = "User UUID"),
    ),
    responses(
        (status = 200, description = "The user's orders", body = [OrderResponse]),
        (status = 400, description = "Unknown user, as {\"fieldErrors\": [...]}"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn get_user_orders<S: Bookstore>(
    state: web::Data<AppState<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let orders = web::block(move || state.orders.get_orders_by_user(user_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let responses: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User UUID"),
    ),
    responses(
        (status = 204, description = "User removed"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn delete_user<S: Bookstore>(
    state: web::Data<AppState<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let deleted = web::block(move || state.users.delete_user(user_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(DomainError::UserNotExist.into())
    }
}
