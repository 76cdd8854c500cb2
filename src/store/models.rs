use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lowest temperature accepted for a stored forecast, in °C.
pub const MIN_TEMPERATURE_C: i32 = -100;
/// Highest temperature accepted for a stored forecast, in °C.
pub const MAX_TEMPERATURE_C: i32 = 100;

/// Temperature above which a forecast counts as severe, in °C.
const SEVERE_HOT_C: i32 = 40;
/// Temperature below which a forecast counts as severe, in °C.
const SEVERE_COLD_C: i32 = -10;
/// Wind speed above which a forecast counts as severe, in km/h.
const SEVERE_WIND_KMH: i32 = 80;

/// Summary used when a candidate arrives without one.
const DEFAULT_SUMMARY: &str = "Unknown";
/// Location used when a candidate arrives without one.
const DEFAULT_LOCATION: &str = "General";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "temperature {0}°C is outside the realistic range \
         [{MIN_TEMPERATURE_C}, {MAX_TEMPERATURE_C}]"
    )]
    TemperatureOutOfRange(i32),
}

/// A stored weather forecast record.
///
/// `id` is assigned by the store and never changes. `summary` and `location`
/// are never empty once stored; `temperature_c` is always within
/// [`MIN_TEMPERATURE_C`, `MAX_TEMPERATURE_C`]. The Fahrenheit value is
/// derived on demand and never stored, so it cannot drift after updates.
#[derive(Debug, Clone)]
pub struct Forecast {
    pub id: Uuid,
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub summary: String,
    pub location: String,
    /// Relative humidity percentage. Intentionally unbounded: the upstream
    /// service never enforced a range, and we preserve that behaviour rather
    /// than invent limits.
    pub humidity: i32,
    /// Wind speed in km/h. Intentionally unbounded, same as `humidity`.
    pub wind_speed: i32,
}

impl Forecast {
    /// Temperature in Fahrenheit, derived from `temperature_c`.
    pub fn temperature_f(&self) -> i32 {
        32 + (self.temperature_c as f64 / 0.5556).round() as i32
    }

    /// Whether this forecast represents severe weather: extreme heat,
    /// extreme cold, or dangerous wind.
    pub fn is_severe(&self) -> bool {
        self.temperature_c > SEVERE_HOT_C
            || self.temperature_c < SEVERE_COLD_C
            || self.wind_speed > SEVERE_WIND_KMH
    }

    /// One-line human-readable description composed from all fields.
    pub fn full_description(&self) -> String {
        format!(
            "{}: {} is {}, {}°C ({}°F) with {}% humidity and wind speeds of {} km/h.",
            self.date,
            self.location,
            self.summary,
            self.temperature_c,
            self.temperature_f(),
            self.humidity,
            self.wind_speed,
        )
    }
}

/// Candidate forecast supplied by a caller on create or update.
///
/// Carries no `id` — identifiers are assigned by the store alone. Missing or
/// empty `summary`/`location` are filled with defaults during conversion.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewForecast {
    /// Forecast date (calendar date, no time of day)
    pub date: NaiveDate,
    /// Air temperature in Celsius, must be within [-100, 100]
    pub temperature_c: i32,
    /// Short condition summary; defaults to "Unknown" when absent or empty
    pub summary: Option<String>,
    /// Place the forecast applies to; defaults to "General" when absent or empty
    pub location: Option<String>,
    /// Relative humidity percentage
    pub humidity: i32,
    /// Wind speed in km/h
    pub wind_speed: i32,
}

impl NewForecast {
    /// Check field constraints. Called on both the create and the update
    /// path, so a record can never re-enter the store with an out-of-range
    /// temperature.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.temperature_c < MIN_TEMPERATURE_C || self.temperature_c > MAX_TEMPERATURE_C {
            return Err(ValidationError::TemperatureOutOfRange(self.temperature_c));
        }
        Ok(())
    }

    /// Build the stored record under the given id, normalizing empty
    /// `summary`/`location` to their defaults. Assumes `validate` passed.
    pub fn into_record(self, id: Uuid) -> Forecast {
        Forecast {
            id,
            date: self.date,
            temperature_c: self.temperature_c,
            summary: non_empty_or(self.summary, DEFAULT_SUMMARY),
            location: non_empty_or(self.location, DEFAULT_LOCATION),
            humidity: self.humidity,
            wind_speed: self.wind_speed,
        }
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => default.to_string(),
    }
}
