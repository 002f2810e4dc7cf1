//! Cached wrapper for the TimeCamp API client
//!
//! Serves project, task and per-day entry listings from the in-memory
//! cache. Timer status and mutations always go to the inner client.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::cache::{CacheKey, CacheStats, CacheTtl, TtlCache};
use crate::client::models::{
    CreatedEntry, NewTimeEntry, Project, StartTimer, StartedTimer, Task, TimeEntry, TimerState,
};
use crate::client::{EntryApi, ListingApi, TimeCampApi, TimerApi};
use crate::clock::Clock;
use crate::error::Result;

/// A cached collection
#[derive(Debug, Clone)]
pub enum CachedValue {
    Projects(Vec<Project>),
    Tasks(Vec<Task>),
    TimeEntries(Vec<TimeEntry>),
}

/// Cached wrapper for any TimeCampApi implementation.
///
/// The cache can be disabled via the `enabled` flag (for `--no-cache`), in
/// which case every call goes to the inner client.
pub struct CachedTimeCampClient<C: TimeCampApi> {
    inner: Arc<C>,
    cache: TtlCache<CacheKey, CachedValue>,
    ttl: CacheTtl,
    enabled: bool,
}

impl<C: TimeCampApi> CachedTimeCampClient<C> {
    /// Create a new cached client wrapper.
    ///
    /// # Arguments
    /// * `inner` - The underlying API client to wrap
    /// * `ttl` - Lifetimes for each kind of cached data
    /// * `clock` - Time source used for expiry
    /// * `enabled` - Whether caching is enabled (false for --no-cache)
    pub fn new(inner: C, ttl: CacheTtl, clock: Arc<dyn Clock>, enabled: bool) -> Self {
        Self {
            inner: Arc::new(inner),
            cache: TtlCache::new(clock),
            ttl,
            enabled,
        }
    }

    /// Get the inner client
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Drop one cached collection
    pub fn invalidate(&self, key: &CacheKey) {
        if self.cache.invalidate(key) {
            log::debug!("Cache invalidated: {}", key);
        }
    }

    /// Drop everything
    pub fn clear(&self) {
        let removed = self.cache.clear();
        log::debug!("Cache cleared: {} entries", removed);
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Try to get cached data
    fn get_cached(&self, key: &CacheKey) -> Option<CachedValue> {
        if !self.enabled {
            return None;
        }
        let hit = self.cache.get(key);
        if hit.is_some() {
            log::debug!("Cache hit: {}", key);
        } else {
            log::debug!("Cache miss: {}", key);
        }
        hit
    }

    /// Store data in cache
    fn set_cached(&self, key: CacheKey, value: CachedValue) {
        if self.enabled {
            let ttl = self.ttl.for_key(&key);
            self.cache.set(key, value, ttl);
        }
    }
}

#[async_trait]
impl<C: TimeCampApi + 'static> TimerApi for CachedTimeCampClient<C> {
    /// Timer status - NEVER cached
    async fn timer_status(&self) -> Result<TimerState> {
        self.inner.timer_status().await
    }

    async fn start_timer(&self, request: &StartTimer) -> Result<StartedTimer> {
        self.inner.start_timer(request).await
    }

    async fn stop_timer(&self) -> Result<()> {
        self.inner.stop_timer().await
    }
}

#[async_trait]
impl<C: TimeCampApi + 'static> ListingApi for CachedTimeCampClient<C> {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let key = CacheKey::Projects;

        if let Some(CachedValue::Projects(cached)) = self.get_cached(&key) {
            return Ok(cached);
        }

        let result = self.inner.list_projects().await?;
        self.set_cached(key, CachedValue::Projects(result.clone()));
        Ok(result)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let key = CacheKey::Tasks;

        if let Some(CachedValue::Tasks(cached)) = self.get_cached(&key) {
            return Ok(cached);
        }

        let result = self.inner.list_tasks().await?;
        self.set_cached(key, CachedValue::Tasks(result.clone()));
        Ok(result)
    }
}

#[async_trait]
impl<C: TimeCampApi + 'static> EntryApi for CachedTimeCampClient<C> {
    async fn list_time_entries(&self, date: NaiveDate) -> Result<Vec<TimeEntry>> {
        let key = CacheKey::TimeEntries(date);

        if let Some(CachedValue::TimeEntries(cached)) = self.get_cached(&key) {
            return Ok(cached);
        }

        let result = self.inner.list_time_entries(date).await?;
        self.set_cached(key, CachedValue::TimeEntries(result.clone()));
        Ok(result)
    }

    async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<CreatedEntry> {
        self.inner.create_time_entry(entry).await
    }
}
