//! Time entry API trait

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::client::models::{CreatedEntry, NewTimeEntry, TimeEntry};
use crate::error::Result;

/// Time entry operations for the TimeCamp API
#[async_trait]
pub trait EntryApi: Send + Sync {
    /// Entries booked on a single day (`GET /time_entries?from=&to=`)
    async fn list_time_entries(&self, date: NaiveDate) -> Result<Vec<TimeEntry>>;

    /// Book a manual entry (`POST /time_entries`)
    async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<CreatedEntry>;
}
