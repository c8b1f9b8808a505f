pub mod handlers;
pub mod models;
pub mod openapi;

use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use handlers::AppService;
use openapi::ApiDoc;

/// Full application router: health check, `/api` routes and the Swagger UI.
pub fn app(service: AppService) -> Router {
    Router::new()
        .route("/", get(|| async { "OK" }))
        .nest("/api", handlers::api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
