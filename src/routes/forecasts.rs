//! Forecast HTTP endpoints.
//!
//! - GET    /api/v1/forecasts?location=&min_temp=
//! - GET    /api/v1/forecasts/stats
//! - GET    /api/v1/forecasts/:id
//! - POST   /api/v1/forecasts
//! - PUT    /api/v1/forecasts/:id
//! - DELETE /api/v1/forecasts/:id

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::errors::{AppError, ErrorResponse};
use crate::services::query::{compute_stats, filter_forecasts, StatsResult};
use crate::store::models::{Forecast, NewForecast};
use crate::store::ForecastStore;

/// Shared application state.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<ForecastStore>,
}

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Case-insensitive substring to match against the forecast location
    pub location: Option<String>,
    /// Inclusive lower bound on temperature in Celsius
    pub min_temp: Option<i32>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A forecast record as returned by the API.
///
/// `temperature_f` and `severe` are derived from the stored fields on every
/// response, so they can never disagree with `temperature_c`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastResponse {
    /// Unique forecast identifier, assigned by the service
    pub id: Uuid,
    /// Forecast date (calendar date, no time of day)
    pub date: NaiveDate,
    /// Air temperature in Celsius
    pub temperature_c: i32,
    /// Air temperature in Fahrenheit (derived)
    pub temperature_f: i32,
    /// Short condition summary (never empty)
    pub summary: String,
    /// Place the forecast applies to (never empty)
    pub location: String,
    /// Relative humidity percentage
    pub humidity: i32,
    /// Wind speed in km/h
    pub wind_speed: i32,
    /// Whether this forecast counts as severe weather (derived)
    pub severe: bool,
}

impl From<Forecast> for ForecastResponse {
    fn from(f: Forecast) -> Self {
        Self {
            temperature_f: f.temperature_f(),
            severe: f.is_severe(),
            id: f.id,
            date: f.date,
            temperature_c: f.temperature_c,
            summary: f.summary,
            location: f.location,
            humidity: f.humidity,
            wind_speed: f.wind_speed,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// List forecasts, optionally filtered by location and minimum temperature.
///
/// Filters combine with AND; omitting both returns every record. An empty
/// result is a valid outcome and is reported as 204 rather than an error.
#[utoipa::path(
    get,
    path = "/api/v1/forecasts",
    tag = "Forecasts",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching forecasts", body = Vec<ForecastResponse>),
        (status = 204, description = "No forecast matched the filters"),
    )
)]
pub async fn list_forecasts(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Response {
    let snapshot = state.store.snapshot().await;
    let matches = filter_forecasts(snapshot, params.location.as_deref(), params.min_temp);

    if matches.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    let items: Vec<ForecastResponse> = matches.into_iter().map(ForecastResponse::from).collect();
    Json(items).into_response()
}

/// Get a single forecast by id.
#[utoipa::path(
    get,
    path = "/api/v1/forecasts/{id}",
    tag = "Forecasts",
    params(
        ("id" = Uuid, Path, description = "Forecast UUID"),
    ),
    responses(
        (status = 200, description = "The requested forecast", body = ForecastResponse),
        (status = 404, description = "Forecast not found", body = ErrorResponse),
    )
)]
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ForecastResponse>, AppError> {
    let forecast = state.store.get(id).await?;
    Ok(Json(ForecastResponse::from(forecast)))
}

/// Create a forecast.
///
/// The body carries no id; the store assigns one and returns it with the
/// created record. Empty `summary`/`location` are replaced with defaults.
#[utoipa::path(
    post,
    path = "/api/v1/forecasts",
    tag = "Forecasts",
    request_body = NewForecast,
    responses(
        (status = 201, description = "Forecast created", body = ForecastResponse),
        (status = 400, description = "Temperature out of range or malformed body", body = ErrorResponse),
    )
)]
pub async fn create_forecast(
    State(state): State<AppState>,
    Json(candidate): Json<NewForecast>,
) -> Result<(StatusCode, Json<ForecastResponse>), AppError> {
    let created = state.store.create(candidate).await?;
    tracing::debug!("Created forecast: {}", created.full_description());
    Ok((StatusCode::CREATED, Json(ForecastResponse::from(created))))
}

/// Replace an existing forecast.
///
/// Every field except the id is overwritten. The replacement runs the same
/// validation as create, so an update can never store an out-of-range
/// temperature.
#[utoipa::path(
    put,
    path = "/api/v1/forecasts/{id}",
    tag = "Forecasts",
    params(
        ("id" = Uuid, Path, description = "Forecast UUID"),
    ),
    request_body = NewForecast,
    responses(
        (status = 204, description = "Forecast updated"),
        (status = 400, description = "Temperature out of range or malformed body", body = ErrorResponse),
        (status = 404, description = "Forecast not found", body = ErrorResponse),
    )
)]
pub async fn update_forecast(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(replacement): Json<NewForecast>,
) -> Result<StatusCode, AppError> {
    state.store.update(id, replacement).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a forecast.
#[utoipa::path(
    delete,
    path = "/api/v1/forecasts/{id}",
    tag = "Forecasts",
    params(
        ("id" = Uuid, Path, description = "Forecast UUID"),
    ),
    responses(
        (status = 204, description = "Forecast deleted"),
        (status = 404, description = "Forecast not found", body = ErrorResponse),
    )
)]
pub async fn delete_forecast(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Aggregate statistics over all stored forecasts.
#[utoipa::path(
    get,
    path = "/api/v1/forecasts/stats",
    tag = "Forecasts",
    responses(
        (status = 200, description = "Statistics over the current records", body = StatsResult),
        (status = 404, description = "No records to aggregate", body = ErrorResponse),
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResult>, AppError> {
    let snapshot = state.store.snapshot().await;
    let stats = compute_stats(&snapshot)?;
    Ok(Json(stats))
}
