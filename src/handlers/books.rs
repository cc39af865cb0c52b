use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::book::{Book, NewBook};
use crate::domain::errors::{DomainError, FieldErrors};
use crate::domain::ports::Bookstore;
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub name: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub quantity: i32,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        BookResponse {
            id: book.id,
            name: book.name,
            price: book.unit_price.to_string(),
            quantity: book.quantity_in_stock,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/books
#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Book added to the catalog", body = BookResponse),
        (status = 400, description = "Validation failure, as {\"fieldErrors\": [...]}"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "books"
)]
pub async fn add_book<S: Bookstore>(
    state: web::Data<AppState<S>>,
    body: web::Json<BookRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let unit_price = BigDecimal::from_str(&body.price).map_err(|_| {
        AppError::Validation(FieldErrors::single(
            "price",
            "Price must be a decimal number",
            json!(body.price),
        ))
    })?;

    let book = web::block(move || {
        state.books.add_book(NewBook {
            name: body.name,
            unit_price,
            quantity_in_stock: body.quantity,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(BookResponse::from(book)))
}

/// GET /api/books/{id}
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(
        ("id" = Uuid, Path, description = "Book UUID"),
    ),
    responses(
        (status = 200, description = "Book found", body = BookResponse),
        (status = 404, description = "Book not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "books"
)]
pub async fn get_book<S: Bookstore>(
    state: web::Data<AppState<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let book_id = path.into_inner();

    let book = web::block(move || state.books.get_book(book_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match book {
        Some(book) => Ok(HttpResponse::Ok().json(BookResponse::from(book))),
        None => Err(DomainError::BookNotExist.into()),
    }
}

/// GET /api/books
#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "The whole catalog, sorted by name", body = [BookResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "books"
)]
pub async fn get_all_books<S: Bookstore>(
    state: web::Data<AppState<S>>,
) -> Result<HttpResponse, AppError> {
    let books = web::block(move || state.books.get_all_books())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let responses: Vec<BookResponse> = books.into_iter().map(BookResponse::from).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// DELETE /api/books/{id}
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(
        ("id" = Uuid, Path, description = "Book UUID"),
    ),
    responses(
        (status = 204, description = "Book removed from the catalog"),
        (status = 404, description = "Book not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "books"
)]
pub async fn delete_book<S: Bookstore>(
    state: web::Data<AppState<S>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let book_id = path.into_inner();

    let deleted = web::block(move || state.books.delete_book(book_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(DomainError::BookNotExist.into())
    }
}
