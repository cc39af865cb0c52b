use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::{DomainError, FieldErrors};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(errors) => AppError::Validation(errors),
            missing @ (DomainError::OrderNotExist
            | DomainError::BookNotExist
            | DomainError::UserNotExist) => AppError::NotFound(missing.to_string()),
            DomainError::Store(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            // Serializes as {"fieldErrors": [{field, message, rejectedValue}]}
            AppError::Validation(errors) => HttpResponse::BadRequest().json(errors),
            AppError::NotFound(message) => HttpResponse::NotFound().json(serde_json::json!({
                "error": message
            })),
            AppError::Internal(_) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })),
        }
    }
}
