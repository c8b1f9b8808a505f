use crate::{
    api::models::*,
    core::{
        errors::AccountsError,
        models::{audit::AppLog, user::User},
        services::AccountsService,
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage},
};
use axum::{
    Extension, Json, Router,
    extract::{
        Path, Request, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{get, post},
};
use http::header;

use std::sync::Arc;

pub type AppService = Arc<AccountsService<InMemoryLogging, InMemoryStorage>>;

/// Middleware resolving the bearer token to a live user, stored as a request extension.
async fn auth_middleware(
    State(service): State<AppService>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AccountsError::Unauthenticated("Missing Authorization header".to_string()))?;

    let token = bearer_token(auth_header)
        .ok_or_else(|| AccountsError::Unauthenticated("Invalid Authorization header".to_string()))?;

    let user = service.authenticate_token(token).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Extracts the credentials of a `Bearer` authorization value. The scheme name
/// is case-insensitive.
pub(crate) fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AccountsError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AccountsError::BadRequest(rejection.body_text()))
}

// Ids that are not numbers cannot name a stored user.
fn parse_user_id(path: Result<Path<String>, PathRejection>) -> Result<u64, AccountsError> {
    let Path(raw) = path.map_err(|rejection| AccountsError::BadRequest(rejection.body_text()))?;
    raw.parse().map_err(|_| AccountsError::UserNotFound(raw))
}

// Define API routes
pub fn api_routes(service: AppService) -> Router {
    let protected_routes = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{user_id}", get(show_user).put(update_user).delete(delete_user))
        .route("/logs", get(list_logs))
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected_routes)
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered successfully", body = RegisterResponse),
        (status = 400, description = "Malformed body", body = MessageResponse),
        (status = 422, description = "Validation error", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn register(
    State(service): State<AppService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let req = parse_body(payload)?;
    let issued = service.register(req.into()).await?;
    Ok(Json(RegisterResponse {
        success: RegisterSuccess {
            token: issued.token,
            name: issued.user.name,
        },
    }))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn login(
    State(service): State<AppService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let req = parse_body(payload)?;
    let issued = service.login(req.into()).await?;
    Ok(Json(LoginResponse {
        success: LoginSuccess {
            token: issued.token,
            user: issued.user,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 401, description = "Unauthenticated", body = MessageResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn list_users(State(service): State<AppService>) -> Result<Json<Vec<User>>, ApiError> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = MessageResponse),
        (status = 401, description = "Unauthenticated", body = MessageResponse),
        (status = 422, description = "Validation error", body = ValidationErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn create_user(
    State(service): State<AppService>,
    Extension(actor): Extension<User>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let req = parse_body(payload)?;
    service.create_user(req.into(), &actor).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("A New User successfully created")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = u64, Path, description = "ID of the user to retrieve")
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = User),
        (status = 401, description = "Unauthenticated", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn show_user(
    State(service): State<AppService>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let user_id = parse_user_id(path)?;
    let user = service.get_user(user_id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = u64, Path, description = "ID of the user to update")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = MessageResponse),
        (status = 400, description = "Malformed body", body = MessageResponse),
        (status = 401, description = "Unauthenticated", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 422, description = "Validation error", body = ValidationErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn update_user(
    State(service): State<AppService>,
    Extension(actor): Extension<User>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = parse_user_id(path)?;
    let req = parse_body(payload)?;
    service.update_user(user_id, req.into(), &actor).await?;
    Ok(Json(MessageResponse::new("A User data updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(
        ("user_id" = u64, Path, description = "ID of the user to delete")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthenticated", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete_user(
    State(service): State<AppService>,
    Extension(actor): Extension<User>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let user_id = parse_user_id(path)?;
    service.delete_user(user_id, &actor).await?;
    Ok(Json(MessageResponse::new("User data deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Audit trail, oldest first", body = Vec<AppLog>),
        (status = 401, description = "Unauthenticated", body = MessageResponse)
    ),
    security(("bearerAuth" = []))
)]
pub async fn list_logs(State(service): State<AppService>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
