//! Time entry models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de::{flexible_opt_u64, flexible_u64};

/// Recorded block of time against a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Entry ID
    #[serde(default, deserialize_with = "flexible_opt_u64")]
    pub id: Option<u64>,

    /// Task the time was booked on
    #[serde(deserialize_with = "flexible_u64")]
    pub task_id: u64,

    /// Day of the entry
    pub date: NaiveDate,

    /// Start time, `HH:MM:SS`
    #[serde(default)]
    pub start_time: String,

    /// End time, `HH:MM:SS`
    #[serde(default)]
    pub end_time: String,

    /// Length in seconds
    #[serde(rename = "duration", deserialize_with = "flexible_u64")]
    pub duration_seconds: u64,

    /// Free-text note
    #[serde(default, alias = "description", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of `POST /time_entries`
#[derive(Debug, Clone, Serialize)]
pub struct NewTimeEntry {
    pub task_id: u64,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Answer to `POST /time_entries`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedEntry {
    #[serde(default, alias = "id", deserialize_with = "flexible_opt_u64")]
    pub entry_id: Option<u64>,
}
