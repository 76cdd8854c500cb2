// Weather Records API v0.1
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod routes;
mod services;
mod store;

use config::AppConfig;
use routes::forecasts::AppState;
use store::ForecastStore;

/// Weather Records API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather Records API",
        version = "0.1.0",
        description = "In-memory weather forecast record service. Stores forecast \
            records in a single concurrency-safe collection, exposes CRUD operations, \
            location/temperature filtering, and aggregate statistics. Seeds a batch \
            of sample forecasts at startup.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Forecasts", description = "Forecast record management and statistics"),
    ),
    paths(
        routes::health::health_check,
        routes::forecasts::list_forecasts,
        routes::forecasts::get_forecast,
        routes::forecasts::create_forecast,
        routes::forecasts::update_forecast,
        routes::forecasts::delete_forecast,
        routes::forecasts::get_stats,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::forecasts::ForecastResponse,
            store::models::NewForecast,
            services::query::StatsResult,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_records_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    // The store is the sole owner of the record collection for the whole
    // process; everything else works on snapshots it hands out.
    let store = Arc::new(ForecastStore::new());

    // Seed sample forecasts
    let today = chrono::Utc::now().date_naive();
    let mut seeded = 0usize;
    for candidate in services::seed::sample_forecasts(config.seed_count, today) {
        match store.create(candidate).await {
            Ok(record) => {
                seeded += 1;
                tracing::debug!("Seeded forecast: {}", record.full_description());
            }
            Err(e) => {
                tracing::error!("Failed to seed forecast: {}", e);
            }
        }
    }
    tracing::info!("Seeded {} sample forecasts", seeded);

    let app_state = AppState { store };

    // CORS — full CRUD surface, so allow the verbs the routes actually use
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
        ])
        .allow_headers(Any);

    // Build router
    // The /stats route is registered alongside /:id; axum prefers the static
    // segment, so "stats" is never captured as an id.
    let forecast_routes = Router::new()
        .route(
            "/api/v1/forecasts",
            get(routes::forecasts::list_forecasts).post(routes::forecasts::create_forecast),
        )
        .route("/api/v1/forecasts/stats", get(routes::forecasts::get_stats))
        .route(
            "/api/v1/forecasts/:id",
            get(routes::forecasts::get_forecast)
                .put(routes::forecasts::update_forecast)
                .delete(routes::forecasts::delete_forecast),
        )
        .with_state(app_state.clone());

    let health_routes = Router::new()
        .route("/api/v1/health", get(routes::health::health_check))
        .with_state(app_state);

    let app = Router::new()
        .merge(health_routes)
        .merge(forecast_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
