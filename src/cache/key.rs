//! Cache keys, one per cached resource type

use std::fmt;

use chrono::NaiveDate;

/// Identifies one cached collection.
///
/// Time entries are keyed per day so that booking time on one date does not
/// evict the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Projects,
    Tasks,
    TimeEntries(NaiveDate),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Projects => f.write_str("projects"),
            CacheKey::Tasks => f.write_str("tasks"),
            CacheKey::TimeEntries(date) => write!(f, "time-entries/{}", date.format("%Y-%m-%d")),
        }
    }
}
