use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::header, routing::get};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tally::api::handlers::api_routes;
use tally::api::openapi::ApiDoc;
use tally::config::CONFIG;
use tally::models::Person;
use tally::service::LedgerService;
use tally::{InMemoryAuditLog, InMemoryStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.as_str())
        .init();

    // Initialize storage and audit trail
    let storage = InMemoryStorage::new();
    let audit = InMemoryAuditLog::new();
    let service = Arc::new(LedgerService::new(storage, audit));

    if let Some(path) = &CONFIG.roster_path {
        let raw = std::fs::read_to_string(path)?;
        let roster: Vec<Person> = serde_json::from_str(&raw)?;
        info!("Seeding roster with {} people from {path}", roster.len());
        for person in roster {
            service.add_person(person).await?;
        }
    }

    let app = Router::new()
        // add / route with a simple health check
        .route("/", get(|| async { "OK" }))
        .merge(api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    http::Method::GET,
                    http::Method::POST,
                    http::Method::PUT,
                    http::Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
