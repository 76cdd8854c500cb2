//! Startup sample data.
//!
//! The service boots with a batch of randomized forecasts so the API is
//! usable out of the box. Seeds go through `ForecastStore::create` like any
//! other record, so every store invariant holds for them too.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::store::models::NewForecast;

const SUMMARIES: &[&str] = &[
    "Freezing", "Bracing", "Chilly", "Cool", "Mild", "Warm", "Balmy", "Hot", "Sweltering",
    "Scorching", "Humid", "Dry", "Windy", "Rainy", "Snowy", "Stormy", "Sunny", "Cloudy", "Foggy",
    "Hazy",
];

const LOCATIONS: &[&str] = &[
    "London", "Paris", "New York", "Tokyo", "Istanbul", "Berlin", "Moscow", "Beijing", "Sydney",
    "Toronto",
];

/// Generate `count` randomized forecast candidates, one per day starting
/// the day after `from`.
pub fn sample_forecasts(count: usize, from: NaiveDate) -> Vec<NewForecast> {
    let mut rng = rand::thread_rng();
    (1..=count as i64)
        .map(|offset| NewForecast {
            date: from + Duration::days(offset),
            temperature_c: rng.gen_range(-20..55),
            summary: Some(SUMMARIES[rng.gen_range(0..SUMMARIES.len())].to_string()),
            location: Some(LOCATIONS[rng.gen_range(0..LOCATIONS.len())].to_string()),
            humidity: rng.gen_range(0..100),
            wind_speed: rng.gen_range(0..100),
        })
        .collect()
}
