//! Read-only queries over a store snapshot.
//!
//! Everything here is a pure transformation of a point-in-time snapshot;
//! nothing touches the store or holds a lock while computing.

use serde::Serialize;
use utoipa::ToSchema;

use crate::store::models::Forecast;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("no forecast data available for stats")]
    EmptyCollection,
}

/// Aggregate statistics over a snapshot.
#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct StatsResult {
    /// Number of records in the snapshot
    pub count: usize,
    /// Mean temperature in Celsius
    pub average_temp_c: f64,
    /// Highest temperature in Celsius
    pub max_temp_c: i32,
    /// Lowest temperature in Celsius
    pub min_temp_c: i32,
    /// Location of the record with the strictly highest temperature
    /// (ties resolve to the first such record in snapshot order)
    pub hottest_location: String,
}

/// Filter a snapshot by optional location substring and minimum temperature.
///
/// The location match is a case-insensitive substring test; `min_temp` is an
/// inclusive lower bound on `temperature_c`. Both filters combine with AND,
/// and an absent filter passes everything. An empty result is a valid value,
/// never an error — the caller decides what "nothing matched" means.
pub fn filter_forecasts(
    snapshot: Vec<Forecast>,
    location: Option<&str>,
    min_temp: Option<i32>,
) -> Vec<Forecast> {
    let location_lower = location.map(str::to_lowercase);
    snapshot
        .into_iter()
        .filter(|f| {
            location_lower
                .as_deref()
                .map_or(true, |needle| f.location.to_lowercase().contains(needle))
        })
        .filter(|f| min_temp.map_or(true, |min| f.temperature_c >= min))
        .collect()
}

/// Compute aggregate statistics over a snapshot.
///
/// Fails with `EmptyCollection` for an empty snapshot — an aggregate over
/// nothing is an error, unlike an empty filter result.
pub fn compute_stats(snapshot: &[Forecast]) -> Result<StatsResult, QueryError> {
    let first = snapshot.first().ok_or(QueryError::EmptyCollection)?;

    let mut max_temp_c = first.temperature_c;
    let mut min_temp_c = first.temperature_c;
    let mut hottest_location = first.location.as_str();
    let mut sum: i64 = 0;

    for f in snapshot {
        sum += i64::from(f.temperature_c);
        if f.temperature_c > max_temp_c {
            max_temp_c = f.temperature_c;
            hottest_location = &f.location;
        }
        if f.temperature_c < min_temp_c {
            min_temp_c = f.temperature_c;
        }
    }

    Ok(StatsResult {
        count: snapshot.len(),
        average_temp_c: sum as f64 / snapshot.len() as f64,
        max_temp_c,
        min_temp_c,
        hottest_location: hottest_location.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn record(location: &str, temperature_c: i32) -> Forecast {
        Forecast {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            temperature_c,
            summary: "Cloudy".to_string(),
            location: location.to_string(),
            humidity: 50,
            wind_speed: 10,
        }
    }

    fn sample() -> Vec<Forecast> {
        vec![
            record("London", 15),
            record("Paris", 20),
            record("London", 5),
        ]
    }

    #[test]
    fn test_filter_no_criteria_passes_everything() {
        let result = filter_forecasts(sample(), None, None);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_filter_location_is_case_insensitive_substring() {
        let result = filter_forecasts(sample(), Some("lon"), None);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|f| f.location == "London"));
    }

    #[test]
    fn test_filter_min_temp_is_inclusive() {
        let result = filter_forecasts(sample(), None, Some(15));
        assert_eq!(result.len(), 2);

        let result = filter_forecasts(sample(), None, Some(21));
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_combines_with_and() {
        let result = filter_forecasts(sample(), Some("lon"), Some(10));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].location, "London");
        assert_eq!(result[0].temperature_c, 15);
    }

    #[test]
    fn test_filter_empty_result_is_a_value() {
        let result = filter_forecasts(sample(), Some("berlin"), None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_stats_aggregates() {
        let snapshot = vec![record("A", 10), record("B", 30), record("C", 30)];
        let stats = compute_stats(&snapshot).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.max_temp_c, 30);
        assert_eq!(stats.min_temp_c, 10);
        assert!((stats.average_temp_c - 23.33).abs() < 0.01);
        // Tie on the maximum resolves to the first record in snapshot order.
        assert_eq!(stats.hottest_location, "B");
    }

    #[test]
    fn test_stats_single_record() {
        let snapshot = vec![record("Oslo", -7)];
        let stats = compute_stats(&snapshot).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.max_temp_c, -7);
        assert_eq!(stats.min_temp_c, -7);
        assert_eq!(stats.average_temp_c, -7.0);
        assert_eq!(stats.hottest_location, "Oslo");
    }

    #[test]
    fn test_stats_empty_collection_is_an_error() {
        assert_eq!(compute_stats(&[]), Err(QueryError::EmptyCollection));
    }
}
