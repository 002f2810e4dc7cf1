//! Timer models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::de::{flexible_opt_u64, parse_timestamp};

/// Live timer state. Never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    /// Whether a timer is currently running
    pub running: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Start time as reported upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
}

/// Shape of `GET /timer_running` while a timer runs
#[derive(Debug, Deserialize)]
struct RunningTimerPayload {
    #[serde(default, deserialize_with = "flexible_opt_u64")]
    timer_id: Option<u64>,
    #[serde(default, deserialize_with = "flexible_opt_u64")]
    task_id: Option<u64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    project_name: Option<String>,
    #[serde(default)]
    started_at: Option<String>,
}

impl TimerState {
    /// State reported when nothing is running.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Interpret a `GET /timer_running` body.
    ///
    /// TimeCamp answers with an object, a one-element array, or an object
    /// without `timer_id` when idle.
    pub fn from_response(value: Value) -> Result<Self, serde_json::Error> {
        let value = match value {
            Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
            other => other,
        };

        let running = match value.get("timer_id") {
            None | Some(Value::Null) => false,
            Some(Value::String(id)) => !matches!(id.trim(), "" | "0"),
            Some(Value::Number(id)) => id.as_u64() != Some(0),
            Some(_) => true,
        };
        if !running {
            return Ok(Self::idle());
        }

        let payload: RunningTimerPayload = serde_json::from_value(value)?;
        Ok(Self {
            running: true,
            timer_id: payload.timer_id,
            task_id: payload.task_id,
            task_name: payload.name,
            project_name: payload.project_name,
            started_at: payload.started_at,
        })
    }

    /// Parsed start time, when upstream supplied a readable one.
    pub fn started_at_utc(&self) -> Option<DateTime<Utc>> {
        self.started_at.as_deref().and_then(parse_timestamp)
    }
}

/// Body of `POST /timer`
#[derive(Debug, Clone, Serialize)]
pub struct StartTimer {
    pub task_id: u64,
    pub started_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Answer to `POST /timer`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartedTimer {
    #[serde(default, alias = "new_timer_id", deserialize_with = "flexible_opt_u64")]
    pub timer_id: Option<u64>,
}
