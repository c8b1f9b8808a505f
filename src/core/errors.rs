use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum AccountsError {
    /// One or more submitted fields failed validation
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// Email is already registered (store-level uniqueness)
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    /// User with given ID not found
    #[error("User {0} not found")]
    UserNotFound(String),

    /// Email/password pair does not match a stored user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed or expired bearer token
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request body could not be parsed
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AccountsError {
    /// Field-level detail for validation failures, empty for every other kind.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            AccountsError::Validation(errors) => errors.clone(),
            AccountsError::EmailAlreadyRegistered(_) => {
                vec![FieldError::new("email", "The email has already been taken.")]
            }
            _ => Vec::new(),
        }
    }
}
