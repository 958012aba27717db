use crate::models::ChartRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use thiserror::Error;

/// Errors that can occur when reading chart documents
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Failed to load fixtures: {0}")]
    Fixtures(String),
}

/// Source of chart documents keyed by profile id
///
/// `Ok(None)` means the profile has no chart. Transport failures are errors.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_chart(&self, profile_id: &str) -> Result<Option<ChartRecord>, StoreError>;
}

/// Store backed by a map, for fixtures and local runs
#[derive(Debug, Default)]
pub struct InMemoryStore {
    charts: RwLock<HashMap<String, ChartRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_charts<I, K>(charts: I) -> Self
    where
        I: IntoIterator<Item = (K, ChartRecord)>,
        K: Into<String>,
    {
        Self {
            charts: RwLock::new(charts.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Parse a JSON object mapping profile ids to chart documents
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let charts: HashMap<String, ChartRecord> =
            serde_json::from_str(json).map_err(|e| StoreError::Fixtures(e.to_string()))?;
        Ok(Self::with_charts(charts))
    }

    /// Load fixtures written in the `from_json` format
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Fixtures(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn insert(&self, profile_id: impl Into<String>, record: ChartRecord) {
        let mut charts = self.charts.write().unwrap_or_else(|e| e.into_inner());
        charts.insert(profile_id.into(), record);
    }

    pub fn len(&self) -> usize {
        self.charts.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn fetch_chart(&self, profile_id: &str) -> Result<Option<ChartRecord>, StoreError> {
        let charts = self.charts.read().unwrap_or_else(|e| e.into_inner());
        Ok(charts.get(profile_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_lookup() {
        let store = InMemoryStore::with_charts([(
            "p1",
            ChartRecord {
                nakshatra: Some(4),
                ..Default::default()
            },
        )]);

        let found = store.fetch_chart("p1").await.unwrap();
        assert_eq!(found.and_then(|r| r.nakshatra), Some(4));
        assert!(store.fetch_chart("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_from_json_loads_charts() {
        let store = InMemoryStore::from_json(
            r#"{"p1": {"nakshatra": 4, "pada": 2, "isManglik": false}, "p2": {"moonLongitude": 97.0}}"#,
        )
        .unwrap();

        assert_eq!(store.len(), 2);
        let found = store.fetch_chart("p2").await.unwrap();
        assert_eq!(found.and_then(|r| r.moon_longitude), Some(97.0));
    }

    #[test]
    fn test_from_json_rejects_bad_fixtures() {
        assert!(matches!(InMemoryStore::from_json("[1, 2]"), Err(StoreError::Fixtures(_))));
        assert!(matches!(
            InMemoryStore::from_json_file("does/not/exist.json"),
            Err(StoreError::Fixtures(_))
        ));
    }

    #[tokio::test]
    async fn test_shipped_fixtures_resolve() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/fixtures.json");
        let store = InMemoryStore::from_json_file(path).unwrap();
        assert!(!store.is_empty());

        for id in ["asha", "bharat", "chetan", "devika", "esha", "farhan"] {
            let record = store.fetch_chart(id).await.unwrap().unwrap();
            assert!(crate::core::resolve_chart(&record).is_ok(), "{} does not resolve", id);
        }
    }

    #[tokio::test]
    async fn test_insert_replaces() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        store.insert("p1", ChartRecord { rashi: Some(1), ..Default::default() });
        store.insert("p1", ChartRecord { rashi: Some(2), ..Default::default() });
        assert_eq!(store.len(), 1);

        let found = store.fetch_chart("p1").await.unwrap();
        assert_eq!(found.and_then(|r| r.rashi), Some(2));
    }
}
