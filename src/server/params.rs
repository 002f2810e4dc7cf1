//! Parameter structs for all tools, plus their validation
//!
//! All parameter structs derive `Deserialize + JsonSchema` so the published
//! tool schemas match what is accepted. Unknown fields are rejected.

use chrono::{NaiveDate, NaiveTime};
use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ValidationError;

/// Longest note TimeCamp accepts
pub const MAX_NOTE_CHARS: usize = 1000;

/// Search query length bounds, after trimming
pub const MAX_QUERY_CHARS: usize = 200;

// ── start_timer ──

/// Parameters for the `start_timer` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StartTimerParams {
    #[schemars(description = "ID of the task to track time against")]
    pub task_id: i64,
    #[schemars(description = "Optional note for the timer (max 1000 characters)")]
    #[serde(default)]
    pub note: Option<String>,
}

/// `start_timer` input after validation
#[derive(Debug, Clone, PartialEq)]
pub struct StartTimerInput {
    pub task_id: u64,
    pub note: Option<String>,
}

impl StartTimerParams {
    pub fn validate(self) -> Result<StartTimerInput, ValidationError> {
        Ok(StartTimerInput {
            task_id: validate_task_id(self.task_id)?,
            note: validate_note(self.note)?,
        })
    }
}

// ── stop_timer ──

/// Parameters for the `stop_timer` tool (none).
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct StopTimerParams {}

// ── create_time_entry ──

/// Parameters for the `create_time_entry` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTimeEntryParams {
    #[schemars(description = "ID of the task the time is booked on")]
    pub task_id: i64,
    #[schemars(description = "Date in YYYY-MM-DD format")]
    pub date: String,
    #[schemars(description = "Start time in HH:MM format")]
    pub start_time: String,
    #[schemars(description = "End time in HH:MM format, after the start time")]
    pub end_time: String,
    #[schemars(description = "Optional note for the entry (max 1000 characters)")]
    #[serde(default)]
    pub note: Option<String>,
}

/// `create_time_entry` input after validation
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTimeEntryInput {
    pub task_id: u64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub note: Option<String>,
}

impl CreateTimeEntryInput {
    /// Length of the entry in seconds; positive after validation.
    pub fn duration_seconds(&self) -> u64 {
        (self.end_time - self.start_time).num_seconds().max(0) as u64
    }
}

impl CreateTimeEntryParams {
    pub fn validate(self) -> Result<CreateTimeEntryInput, ValidationError> {
        let task_id = validate_task_id(self.task_id)?;
        let date = parse_date(&self.date)?;
        let start_time = parse_time("start_time", &self.start_time)?;
        let end_time = parse_time("end_time", &self.end_time)?;
        if end_time <= start_time {
            return Err(ValidationError::new(
                "end_time",
                "End time must be after start time",
            ));
        }
        let note = validate_note(self.note)?;

        Ok(CreateTimeEntryInput {
            task_id,
            date,
            start_time,
            end_time,
            note,
        })
    }
}

/// Decode tool arguments. A missing argument object counts as `{}`.
pub fn decode_args<T: DeserializeOwned>(args: Value) -> Result<T, ValidationError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ValidationError::new("arguments", e.to_string()))
}

fn validate_task_id(task_id: i64) -> Result<u64, ValidationError> {
    u64::try_from(task_id)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ValidationError::new("task_id", "must be a positive integer"))
}

/// Empty notes are dropped.
fn validate_note(note: Option<String>) -> Result<Option<String>, ValidationError> {
    match note {
        Some(note) if note.chars().count() > MAX_NOTE_CHARS => Err(ValidationError::new(
            "note",
            format!("must be at most {} characters", MAX_NOTE_CHARS),
        )),
        Some(note) if note.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Strict `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::new("date", "Invalid date format. Use YYYY-MM-DD");
    if !matches_shape(raw, "dddd-dd-dd") {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())
}

/// Strict `HH:MM`
fn parse_time(field: &'static str, raw: &str) -> Result<NaiveTime, ValidationError> {
    let invalid = || ValidationError::new(field, "Invalid time format. Use HH:MM");
    if !matches_shape(raw, "dd:dd") {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| invalid())
}

/// Search queries: 1 to 200 characters once trimmed
pub fn validate_query(raw: &str) -> Result<String, ValidationError> {
    let query = raw.trim();
    let len = query.chars().count();
    if len == 0 {
        return Err(ValidationError::new("query", "Search query cannot be empty"));
    }
    if len > MAX_QUERY_CHARS {
        return Err(ValidationError::new(
            "query",
            format!("must be at most {} characters", MAX_QUERY_CHARS),
        ));
    }
    Ok(query.to_string())
}

/// `d` matches an ASCII digit, anything else matches itself.
fn matches_shape(raw: &str, shape: &str) -> bool {
    raw.len() == shape.len()
        && raw.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'd' => c.is_ascii_digit(),
            _ => c == s,
        })
}
