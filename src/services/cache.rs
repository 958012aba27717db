use crate::models::ChartRecord;
use crate::services::store::{ProfileStore, StoreError};
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

/// Read-through cache in front of another profile store
///
/// Charts do not change once a profile exists, so hits are served from
/// memory until the TTL expires. Missing charts are not cached.
pub struct CachedStore<S> {
    inner: S,
    cache: Cache<String, ChartRecord>,
}

impl<S: ProfileStore> CachedStore<S> {
    pub fn new(inner: S, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drop a cached chart, e.g. after a profile was corrected upstream
    pub async fn invalidate(&self, profile_id: &str) {
        self.cache.invalidate(profile_id).await;
    }

    /// Approximate number of cached charts
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[async_trait]
impl<S: ProfileStore> ProfileStore for CachedStore<S> {
    async fn fetch_chart(&self, profile_id: &str) -> Result<Option<ChartRecord>, StoreError> {
        if let Some(record) = self.cache.get(profile_id).await {
            tracing::trace!("Chart cache hit: {}", profile_id);
            return Ok(Some(record));
        }

        tracing::trace!("Chart cache miss: {}", profile_id);
        let fetched = self.inner.fetch_chart(profile_id).await?;

        if let Some(record) = &fetched {
            self.cache.insert(profile_id.to_string(), record.clone()).await;
        }

        Ok(fetched)
    }
}
