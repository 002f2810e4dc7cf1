//! In-memory cache for API responses
//!
//! Collections fetched from TimeCamp are kept for a short TTL so that
//! repeated resource reads and searches do not hit the API every time.
//! Mutating tools invalidate the affected keys eagerly.

pub mod client;
pub mod key;
pub mod storage;

use std::time::Duration;

/// Cache TTL configuration per data type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    /// Projects and tasks
    pub entities: Duration,
    /// Time entries, per day
    pub entries: Duration,
}

impl CacheTtl {
    // Projects and tasks change rarely
    pub const ENTITIES: Duration = Duration::from_secs(5 * 60); // 5 min

    // Entries change whenever a timer stops or time is booked
    pub const ENTRIES: Duration = Duration::from_secs(60); // 1 min

    /// TTL to apply to a key
    pub fn for_key(&self, key: &CacheKey) -> Duration {
        match key {
            CacheKey::Projects | CacheKey::Tasks => self.entities,
            CacheKey::TimeEntries(_) => self.entries,
        }
    }
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            entities: Self::ENTITIES,
            entries: Self::ENTRIES,
        }
    }
}

// Re-export main types
pub use client::CachedTimeCampClient;
pub use key::CacheKey;
pub use storage::{CacheEntry, CacheStats, TtlCache};
