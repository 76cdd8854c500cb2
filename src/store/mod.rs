//! In-memory forecast store.
//!
//! The store is the sole owner of the record collection. It is built once in
//! `main` and shared behind an `Arc`; every handler goes through it, so all
//! writes are serialized by the internal lock and a reader never observes a
//! half-applied update.

pub mod models;

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use self::models::{Forecast, NewForecast, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no forecast with id {0}")]
    NotFound(Uuid),
}

/// Concurrency-safe collection of forecast records keyed by id.
#[derive(Debug, Default)]
pub struct ForecastStore {
    records: RwLock<HashMap<Uuid, Forecast>>,
}

impl ForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert a candidate, assigning it a fresh id.
    /// Returns the stored record, including the assigned id.
    pub async fn create(&self, candidate: NewForecast) -> Result<Forecast, StoreError> {
        candidate.validate()?;
        let record = candidate.into_record(Uuid::new_v4());
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    /// Fetch a copy of the record with the given id.
    pub async fn get(&self, id: Uuid) -> Result<Forecast, StoreError> {
        let records = self.records.read().await;
        records.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Replace every field of an existing record except its id.
    ///
    /// The replacement runs the same validation as `create`; on any failure
    /// the stored record is left untouched.
    pub async fn update(&self, id: Uuid, replacement: NewForecast) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        replacement.validate()?;
        records.insert(id, replacement.into_record(id));
        Ok(())
    }

    /// Remove the record with the given id.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        records.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }

    /// Point-in-time copy of all records. Iteration order carries no meaning.
    pub async fn snapshot(&self) -> Vec<Forecast> {
        let records = self.records.read().await;
        records.values().cloned().collect()
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn candidate(temperature_c: i32, location: &str) -> NewForecast {
        NewForecast {
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            temperature_c,
            summary: Some("Cloudy".to_string()),
            location: Some(location.to_string()),
            humidity: 55,
            wind_speed: 12,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_stores_record() {
        let store = ForecastStore::new();
        let created = store.create(candidate(40, "London")).await.unwrap();

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.temperature_c, 40);
        assert_eq!(fetched.location, "London");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_temperature() {
        let store = ForecastStore::new();
        let err = store.create(candidate(150, "London")).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let store = ForecastStore::new();
        let mut c = candidate(10, "");
        c.summary = None;
        let created = store.create(c).await.unwrap();
        assert_eq!(created.summary, "Unknown");
        assert_eq!(created.location, "General");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let store = ForecastStore::new();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields_except_id() {
        let store = ForecastStore::new();
        let created = store.create(candidate(10, "London")).await.unwrap();

        store
            .update(created.id, candidate(-5, "Oslo"))
            .await
            .unwrap();

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.temperature_c, -5);
        assert_eq!(fetched.location, "Oslo");
    }

    #[tokio::test]
    async fn test_update_applies_defaults() {
        let store = ForecastStore::new();
        let created = store.create(candidate(10, "London")).await.unwrap();

        let mut replacement = candidate(12, "");
        replacement.summary = None;
        store.update(created.id, replacement).await.unwrap();

        // The update path normalizes exactly like create.
        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.summary, "Unknown");
        assert_eq!(fetched.location, "General");
        assert_eq!(fetched.temperature_c, 12);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = ForecastStore::new();
        let err = store
            .update(Uuid::new_v4(), candidate(10, "London"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_validates_like_create_and_keeps_old_record() {
        let store = ForecastStore::new();
        let created = store.create(candidate(10, "London")).await.unwrap();

        let err = store
            .update(created.id, candidate(999, "Oslo"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        // Failed update must not leave a partial mutation behind.
        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.temperature_c, 10);
        assert_eq!(fetched.location, "London");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = ForecastStore::new();
        let created = store.create(candidate(10, "London")).await.unwrap();

        store.delete(created.id).await.unwrap();
        let err = store.get(created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let err = store.delete(created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_snapshot_is_a_copy() {
        let store = ForecastStore::new();
        let created = store.create(candidate(10, "London")).await.unwrap();

        let snapshot = store.snapshot().await;
        store.delete(created.id).await.unwrap();

        // The snapshot taken before the delete still holds the record.
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        const WRITERS: usize = 32;

        let store = Arc::new(ForecastStore::new());
        let mut handles = Vec::with_capacity(WRITERS);
        for i in 0..WRITERS {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create(candidate(i as i32, "London"))
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }

        assert_eq!(ids.len(), WRITERS);
        assert_eq!(store.len().await, WRITERS);
    }
}
