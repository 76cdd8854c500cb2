use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::routes::forecasts::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("ok" — the store is in-process, there is no backend to fail)
    pub status: String,
    /// API version
    pub version: String,
    /// Number of forecast records currently stored
    pub records: usize,
}

/// Health check endpoint.
///
/// Returns the API status, version, and current record count. The store
/// lives in-process, so reachability of the service implies reachability
/// of the data.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records: state.store.len().await,
    })
}
