use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// One rejected input field, in the shape the API reports it:
/// which field, why, and the value that was refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub rejected_value: Value,
}

/// Accumulator for validation failures. Errors keep the order in which
/// they were recorded, and serialize as `{"fieldErrors": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    field_errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(
        field: impl Into<String>,
        message: impl Into<String>,
        rejected_value: Value,
    ) -> Self {
        let mut errors = Self::new();
        errors.add(field, message, rejected_value);
        errors
    }

    pub fn add(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        rejected_value: Value,
    ) {
        self.field_errors.push(FieldError {
            field: field.into(),
            message: message.into(),
            rejected_value,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.field_errors.len()
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.field_errors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.field_errors.iter()
    }
}

/// Failures coming out of a backing store. These never reach clients
/// verbatim; the HTTP layer reports them as internal errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
    #[error("connection pool error: {0}")]
    Pool(String),
}

#[derive(Debug, Error)]
pub enum DomainError {
    /// Input was understood but refused. Maps to 400 with field details.
    #[error("validation failed")]
    Validation(FieldErrors),
    /// The addressed order does not exist. Maps to 404.
    #[error("Order with this id doesn't exist")]
    OrderNotExist,
    /// The addressed book does not exist. Maps to 404.
    #[error("Book doesn't exist")]
    BookNotExist,
    /// The addressed user does not exist. Maps to 404.
    #[error("User doesn't exist")]
    UserNotExist,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Shortcut for the common single-field rejection.
    pub fn field(
        field: impl Into<String>,
        message: impl Into<String>,
        rejected_value: Value,
    ) -> Self {
        DomainError::Validation(FieldErrors::single(field, message, rejected_value))
    }
}
