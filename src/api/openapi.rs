use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    api::models::{
        CreateUserRequest, ErrorResponse, LoginRequest, LoginResponse, LoginSuccess, MessageResponse, RegisterRequest,
        RegisterResponse, RegisterSuccess, UpdateUserRequest, ValidationErrorResponse,
    },
    core::models::{audit::AppLog, user::User},
};

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::register,
        super::handlers::login,
        super::handlers::list_users,
        super::handlers::create_user,
        super::handlers::show_user,
        super::handlers::update_user,
        super::handlers::delete_user,
        super::handlers::list_logs
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        CreateUserRequest,
        UpdateUserRequest,
        RegisterSuccess,
        RegisterResponse,
        LoginSuccess,
        LoginResponse,
        MessageResponse,
        ErrorResponse,
        ValidationErrorResponse,
        User,
        AppLog
    )),
    modifiers(&BearerSecurity),
    info(
        title = "Accounts API",
        description = "API for user registration, login and user management",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
