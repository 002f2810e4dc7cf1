//! Tool handlers: the only operations that change TimeCamp state

use chrono::{Local, NaiveTime};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use super::TimeCampServer;
use super::params::{
    CreateTimeEntryInput, CreateTimeEntryParams, StartTimerInput, StartTimerParams,
    StopTimerParams, decode_args,
};
use super::responses::{
    TimeEntryCreatedResponse, TimerStartedResponse, TimerStoppedResponse, ToolResponse,
    elapsed_seconds, format_duration, task_labels,
};
use crate::cache::CacheKey;
use crate::changes::{ChangeEvent, ChangeKind};
use crate::client::models::{NewTimeEntry, Project, StartTimer, Task};
use crate::client::{EntryApi, TimeCampApi, TimerApi};
use crate::error::{ApiError, Result, ValidationError};

/// Task name used when the running timer does not report one
const UNKNOWN_TIMER_TASK: &str = "Unknown task";

/// Advertised tool with its parameter schema
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Every tool this adapter exposes
pub fn tool_descriptors() -> Result<Vec<ToolDescriptor>> {
    Ok(vec![
        descriptor::<StartTimerParams>("start_timer", "Start tracking time for a specific task")?,
        descriptor::<StopTimerParams>("stop_timer", "Stop the currently running timer")?,
        descriptor::<CreateTimeEntryParams>(
            "create_time_entry",
            "Manually create a time entry for past work",
        )?,
    ])
}

fn descriptor<T: JsonSchema>(name: &'static str, description: &'static str) -> Result<ToolDescriptor> {
    Ok(ToolDescriptor {
        name,
        description,
        input_schema: serde_json::to_value(schemars::schema_for!(T))?,
    })
}

impl<C: TimeCampApi + 'static> TimeCampServer<C> {
    /// Call a tool by name with JSON arguments.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<ToolResponse> {
        match name {
            "start_timer" => {
                let input = decode_args::<StartTimerParams>(args)?.validate()?;
                Ok(ToolResponse::TimerStarted(self.start_timer(input).await?))
            }
            "stop_timer" => {
                decode_args::<StopTimerParams>(args)?;
                Ok(ToolResponse::TimerStopped(self.stop_timer().await?))
            }
            "create_time_entry" => {
                let input = decode_args::<CreateTimeEntryParams>(args)?.validate()?;
                Ok(ToolResponse::TimeEntryCreated(
                    self.create_time_entry(input).await?,
                ))
            }
            other => Err(ValidationError::new("tool", format!("Unknown tool: {}", other)).into()),
        }
    }

    /// Start a timer, refusing if one is already running.
    pub async fn start_timer(&self, input: StartTimerInput) -> Result<TimerStartedResponse> {
        let current = self.client.timer_status().await?;
        if current.running {
            return Err(ApiError::Conflict(format!(
                "Timer already running for task '{}' (ID: {})",
                current.task_name.as_deref().unwrap_or(UNKNOWN_TIMER_TASK),
                current
                    .timer_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            ))
            .into());
        }

        let started_at = self
            .clock
            .now()
            .with_timezone(&Local)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string();
        let started = self
            .client
            .start_timer(&StartTimer {
                task_id: input.task_id,
                started_at: started_at.clone(),
                note: input.note,
            })
            .await?;

        let (projects, tasks) = self.listings_for_labels().await;
        let task_known = tasks.iter().any(|t| t.id == input.task_id);
        let (task_name, project_name) = task_labels(input.task_id, &tasks, &projects);

        log::info!("Timer started for task {} ({})", input.task_id, task_name);
        self.changes.record(
            ChangeEvent::new(ChangeKind::TimerStarted, self.clock.now())
                .with_detail("task_id", input.task_id)
                .with_detail("task_name", task_name.as_str())
                .with_detail("timer_id", started.timer_id)
                .with_detail("started_at", started_at.as_str()),
        );

        Ok(TimerStartedResponse {
            message: format!("Timer started for task '{}'", task_name),
            timer_id: started.timer_id,
            task_id: input.task_id,
            task_name,
            started_at,
            project_name: task_known.then_some(project_name),
        })
    }

    /// Stop the running timer.
    pub async fn stop_timer(&self) -> Result<TimerStoppedResponse> {
        let current = self.client.timer_status().await?;
        if !current.running {
            return Err(ApiError::Conflict("No timer is currently running".to_string()).into());
        }

        self.client.stop_timer().await?;

        let (duration, duration_seconds) = match elapsed_seconds(&current, self.clock.now()) {
            Some(secs) => (format_duration(secs), secs),
            None => ("Unknown duration".to_string(), 0),
        };
        let task_name = current
            .task_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_TIMER_TASK.to_string());

        // The stopped timer is now one of today's entries
        self.client.invalidate(&CacheKey::TimeEntries(self.clock.today()));

        log::info!("Timer stopped after {} ({})", duration, task_name);
        self.changes.record(
            ChangeEvent::new(ChangeKind::TimerStopped, self.clock.now())
                .with_detail("task_id", current.task_id)
                .with_detail("task_name", task_name.as_str())
                .with_detail("timer_id", current.timer_id)
                .with_detail("duration_seconds", duration_seconds)
                .with_detail("duration", duration.as_str()),
        );

        Ok(TimerStoppedResponse {
            message: "Timer stopped".to_string(),
            duration,
            duration_seconds,
            task_name,
            task_id: current.task_id,
            timer_id: current.timer_id,
        })
    }

    /// Book a block of past time.
    pub async fn create_time_entry(
        &self,
        input: CreateTimeEntryInput,
    ) -> Result<TimeEntryCreatedResponse> {
        let duration_seconds = input.duration_seconds();
        let created = self
            .client
            .create_time_entry(&NewTimeEntry {
                task_id: input.task_id,
                date: input.date,
                start_time: seconds_precision(input.start_time),
                end_time: seconds_precision(input.end_time),
                duration: duration_seconds,
                note: input.note.clone(),
            })
            .await?;

        let (projects, tasks) = self.listings_for_labels().await;
        let (task_name, project_name) = task_labels(input.task_id, &tasks, &projects);
        let duration = format_duration(duration_seconds);

        self.client.invalidate(&CacheKey::TimeEntries(input.date));

        log::info!(
            "Time entry created: task {} on {} for {}",
            input.task_id,
            input.date,
            duration
        );
        self.changes.record(
            ChangeEvent::new(ChangeKind::EntryCreated, self.clock.now())
                .with_detail("entry_id", created.entry_id)
                .with_detail("task_id", input.task_id)
                .with_detail("task_name", task_name.as_str())
                .with_detail("project_name", project_name.as_str())
                .with_detail("date", input.date.format("%Y-%m-%d").to_string())
                .with_detail("duration_seconds", duration_seconds)
                .with_detail("duration", duration.as_str()),
        );

        Ok(TimeEntryCreatedResponse {
            entry_id: created.entry_id,
            task_id: input.task_id,
            task_name,
            project_name,
            date: input.date,
            start_time: input.start_time.format("%H:%M").to_string(),
            end_time: input.end_time.format("%H:%M").to_string(),
            duration,
            duration_seconds,
            note: input.note.unwrap_or_default(),
        })
    }

    /// Projects and tasks for naming things in a response.
    ///
    /// The mutation already succeeded by the time this runs, so a failed
    /// lookup degrades to fallback names instead of failing the tool.
    async fn listings_for_labels(&self) -> (Vec<Project>, Vec<Task>) {
        match self.warm_listings().await {
            Ok(listings) => listings,
            Err(err) => {
                log::warn!("Could not load task names: {}", err);
                (Vec::new(), Vec::new())
            }
        }
    }
}

/// `HH:MM` as TimeCamp's `HH:MM:00`
fn seconds_precision(time: NaiveTime) -> String {
    time.format("%H:%M:00").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_descriptors() {
        let tools = tool_descriptors().unwrap();
        let names: Vec<_> = tools.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["start_timer", "stop_timer", "create_time_entry"]);
        assert!(tools[0].input_schema["properties"]["task_id"].is_object());
        assert_eq!(tools[1].input_schema["additionalProperties"], false);
    }

    #[test]
    fn test_seconds_precision() {
        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(seconds_precision(time), "09:05:00");
    }
}
