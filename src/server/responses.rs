//! Response types for resources and tools

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::changes::ChangeEvent;
use crate::client::models::{Project, Task, TimeEntry, TimerState};
use crate::search::{NO_PROJECT, SearchResult};

/// Task name shown when a task ID is not in the task list
pub const UNKNOWN_TASK: &str = "Unknown";

/// Format seconds as `"{h}h {m}m"`, or `"{m}m"` under an hour.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Name of a task and of its project, with the usual fallbacks.
pub fn task_labels(task_id: u64, tasks: &[Task], projects: &[Project]) -> (String, String) {
    let task = tasks.iter().find(|t| t.id == task_id);
    let task_name = task
        .map(|t| t.name.clone())
        .unwrap_or_else(|| UNKNOWN_TASK.to_string());
    let project_name = task
        .and_then(|t| t.project_id)
        .and_then(|pid| projects.iter().find(|p| p.id == pid))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| NO_PROJECT.to_string());
    (task_name, project_name)
}

// ── Resources ──

/// One project in `timecamp://projects`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectInfo {
    pub id: u64,
    pub name: String,
    pub color: String,
    pub tasks_count: usize,
    pub archived: bool,
}

/// `timecamp://projects`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectInfo>,
    pub total_count: usize,
    pub include_archived: bool,
}

impl ProjectListResponse {
    /// Projects sorted by name, each with its task count.
    pub fn build(projects: &[Project], tasks: &[Task]) -> Self {
        let mut projects = projects.to_vec();
        crate::client::models::count_tasks(&mut projects, tasks);

        let mut infos: Vec<ProjectInfo> = projects
            .into_iter()
            .map(|p| ProjectInfo {
                color: p.display_color().to_string(),
                id: p.id,
                name: p.name,
                tasks_count: p.task_count,
                archived: p.archived,
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Self {
            total_count: infos.len(),
            projects: infos,
            include_archived: true,
        }
    }
}

/// One task in `timecamp://tasks`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskInfo {
    pub id: u64,
    pub name: String,
    pub project_id: Option<u64>,
    pub project_name: String,
    pub archived: bool,
}

impl TaskInfo {
    pub fn enrich(tasks: &[Task], projects: &[Project]) -> Vec<Self> {
        tasks
            .iter()
            .map(|t| {
                let project_name = t
                    .project_id
                    .and_then(|pid| projects.iter().find(|p| p.id == pid))
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| NO_PROJECT.to_string());
                TaskInfo {
                    id: t.id,
                    name: t.name.clone(),
                    project_id: t.project_id,
                    project_name,
                    archived: t.archived,
                }
            })
            .collect()
    }
}

/// `timecamp://timer`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TimerStatusResponse {
    pub is_running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
}

impl TimerStatusResponse {
    pub fn from_state(timer: &TimerState, now: DateTime<Utc>) -> Self {
        if !timer.running {
            return Self {
                is_running: false,
                message: Some("No timer is currently running".to_string()),
                ..Self::default()
            };
        }

        let (elapsed_time, elapsed_seconds) = match elapsed_seconds(timer, now) {
            Some(secs) => (format_duration(secs), secs),
            None => ("Unknown".to_string(), 0),
        };

        Self {
            is_running: true,
            message: None,
            task_name: Some(
                timer
                    .task_name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_TASK.to_string()),
            ),
            task_id: timer.task_id,
            timer_id: timer.timer_id,
            project_name: Some(
                timer
                    .project_name
                    .clone()
                    .unwrap_or_else(|| NO_PROJECT.to_string()),
            ),
            elapsed_time: Some(elapsed_time),
            elapsed_seconds: Some(elapsed_seconds),
            start_time: timer.started_at.clone(),
        }
    }
}

/// Seconds since the timer started, when its start time is readable.
pub fn elapsed_seconds(timer: &TimerState, now: DateTime<Utc>) -> Option<u64> {
    let started = timer.started_at_utc()?;
    Some((now - started).num_seconds().max(0) as u64)
}

/// One task's share of a day in `timecamp://time-entries/{date}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummaryEntry {
    pub task_name: String,
    pub task_id: u64,
    pub project_name: String,
    pub duration: String,
    pub duration_seconds: u64,
    pub notes: Vec<String>,
}

/// `timecamp://time-entries/{date}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummaryResponse {
    pub date: NaiveDate,
    pub total_time: String,
    pub total_seconds: u64,
    pub entries: Vec<DailySummaryEntry>,
    pub entry_count: usize,
    pub is_timer_running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_task_id: Option<u64>,
}

impl DailySummaryResponse {
    /// Group a day's entries by task.
    ///
    /// `timer` is only passed for today; it fills in the running task.
    pub fn build(
        date: NaiveDate,
        entries: &[TimeEntry],
        tasks: &[Task],
        projects: &[Project],
        timer: Option<&TimerState>,
    ) -> Self {
        let mut grouped: Vec<DailySummaryEntry> = Vec::new();
        let mut index: HashMap<u64, usize> = HashMap::new();
        let mut total_seconds: u64 = 0;

        for entry in entries {
            total_seconds = total_seconds.saturating_add(entry.duration_seconds);

            let slot = *index.entry(entry.task_id).or_insert_with(|| {
                let (task_name, project_name) = task_labels(entry.task_id, tasks, projects);
                grouped.push(DailySummaryEntry {
                    task_name,
                    task_id: entry.task_id,
                    project_name,
                    duration: String::new(),
                    duration_seconds: 0,
                    notes: Vec::new(),
                });
                grouped.len() - 1
            });

            let group = &mut grouped[slot];
            group.duration_seconds = group
                .duration_seconds
                .saturating_add(entry.duration_seconds);
            if let Some(note) = entry.note.as_deref().filter(|n| !n.is_empty())
                && !group.notes.iter().any(|n| n == note)
            {
                group.notes.push(note.to_string());
            }
        }

        for group in &mut grouped {
            group.duration = format_duration(group.duration_seconds);
        }
        grouped.sort_by(|a, b| {
            b.duration_seconds
                .cmp(&a.duration_seconds)
                .then_with(|| a.task_name.cmp(&b.task_name))
        });

        let running = timer.filter(|t| t.running);
        Self {
            date,
            total_time: format_duration(total_seconds),
            total_seconds,
            entry_count: grouped.len(),
            entries: grouped,
            is_timer_running: running.is_some(),
            current_task: running.map(|t| {
                t.task_name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_TASK.to_string())
            }),
            current_task_id: running.and_then(|t| t.task_id),
        }
    }
}

/// `timecamp://search/{query}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total_results: usize,
    pub query: String,
}

/// `timecamp://changes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangesResponse {
    pub changes: Vec<ChangeEvent>,
    pub timestamp: DateTime<Utc>,
}

/// Any resource payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceResponse {
    Projects(ProjectListResponse),
    Tasks(Vec<TaskInfo>),
    Timer(TimerStatusResponse),
    TimeEntries(DailySummaryResponse),
    Changes(ChangesResponse),
    Search(SearchResponse),
}

// ── Tools ──

/// `start_timer`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerStartedResponse {
    pub message: String,
    pub timer_id: Option<u64>,
    pub task_id: u64,
    pub task_name: String,
    pub started_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

/// `stop_timer`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerStoppedResponse {
    pub message: String,
    pub duration: String,
    pub duration_seconds: u64,
    pub task_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_id: Option<u64>,
}

/// `create_time_entry`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntryCreatedResponse {
    pub entry_id: Option<u64>,
    pub task_id: u64,
    pub task_name: String,
    pub project_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub duration_seconds: u64,
    pub note: String,
}

/// Any tool payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    TimerStarted(TimerStartedResponse),
    TimerStopped(TimerStoppedResponse),
    TimeEntryCreated(TimeEntryCreatedResponse),
}
