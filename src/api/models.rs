use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::core::errors::AccountsError;
use crate::core::models::user::User;
use crate::core::validation::UserInput;

// Request structs for JSON payloads. Fields are optional so that a missing
// field is reported as a validation error rather than a parse failure.
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl From<RegisterRequest> for UserInput {
    fn from(req: RegisterRequest) -> Self {
        UserInput {
            name: req.name,
            email: req.email,
            password: req.password,
            password_confirmation: req.password_confirmation,
        }
    }
}

impl From<LoginRequest> for UserInput {
    fn from(req: LoginRequest) -> Self {
        UserInput {
            email: req.email,
            password: req.password,
            ..UserInput::default()
        }
    }
}

impl From<CreateUserRequest> for UserInput {
    fn from(req: CreateUserRequest) -> Self {
        UserInput {
            name: req.name,
            email: req.email,
            password: req.password,
            password_confirmation: None,
        }
    }
}

impl From<UpdateUserRequest> for UserInput {
    fn from(req: UpdateUserRequest) -> Self {
        UserInput {
            name: req.name,
            email: req.email,
            password: req.password,
            password_confirmation: req.password_confirmation,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct RegisterSuccess {
    pub token: String,
    pub name: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    pub success: RegisterSuccess,
}

#[derive(Serialize, ToSchema)]
pub struct LoginSuccess {
    pub token: String,
    pub user: User,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: LoginSuccess,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

// Error response structs
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub message: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

// Newtype wrapper for AccountsError to implement IntoResponse
pub struct ApiError(pub AccountsError);

impl From<AccountsError> for ApiError {
    fn from(err: AccountsError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let message = |status: StatusCode, text: String| (status, Json(MessageResponse::new(text))).into_response();

        match self.0 {
            err @ (AccountsError::Validation(_) | AccountsError::EmailAlreadyRegistered(_)) => {
                let field_errors = err.field_errors();
                let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for fe in &field_errors {
                    errors.entry(fe.field.clone()).or_default().push(fe.message.clone());
                }
                let summary = field_errors
                    .first()
                    .map(|fe| fe.message.clone())
                    .unwrap_or_else(|| "The given data was invalid.".to_string());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ValidationErrorResponse {
                        message: summary,
                        errors,
                    }),
                )
                    .into_response()
            }
            AccountsError::UserNotFound(_) => message(StatusCode::NOT_FOUND, "User not found".to_string()),
            AccountsError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Unauthorised".to_string(),
                }),
            )
                .into_response(),
            AccountsError::Unauthenticated(reason) => {
                warn!(%reason, "rejected unauthenticated request");
                message(StatusCode::UNAUTHORIZED, "Unauthenticated.".to_string())
            }
            AccountsError::Forbidden(msg) => message(StatusCode::FORBIDDEN, msg),
            AccountsError::BadRequest(msg) => message(StatusCode::BAD_REQUEST, msg),
            err @ (AccountsError::InternalServerError(_)
            | AccountsError::StorageError(_)
            | AccountsError::LoggingError(_)) => {
                error!(error = %err, "request failed");
                message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        }
    }
}
