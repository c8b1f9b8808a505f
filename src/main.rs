use accounts_api::api::app;
use accounts_api::config::CONFIG;
use accounts_api::core::services::AccountsService;
use accounts_api::infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage};
use axum::http::{Method, header};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("Starting accounts api with {:?}", *CONFIG);
    for warning in &CONFIG.warnings {
        warn!("{}", warning);
    }

    // Initialize storage and logging
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::with_capacity(CONFIG.audit_log_capacity);
    let service = Arc::new(AccountsService::new(storage, logging, CONFIG.auth_settings()));

    let app = app(service)
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    // Start server
    let addr: SocketAddr = format!("{}:{}", CONFIG.host, CONFIG.port).parse()?;
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
