//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)] // Builder methods are available for future tests

use chrono::NaiveDate;

use super::models::{Project, Task, TimeEntry, TimerState};

// ============================================================================
// ProjectBuilder
// ============================================================================

/// Builder for creating test Project instances.
///
/// # Example
/// ```ignore
/// let project = ProjectBuilder::new(1).name("Frontend Development").build();
/// ```
#[derive(Debug, Clone)]
pub struct ProjectBuilder {
    id: u64,
    name: String,
    color: Option<String>,
    archived: bool,
}

impl ProjectBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: format!("Project {}", id),
            color: None,
            archived: false,
        }
    }

    /// Set the project name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the display colour.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Mark the project archived.
    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    /// Build the Project instance.
    pub fn build(self) -> Project {
        Project {
            id: self.id,
            name: self.name,
            color: self.color,
            archived: self.archived,
            parent_id: None,
            task_count: 0,
        }
    }
}

// ============================================================================
// TaskBuilder
// ============================================================================

/// Builder for creating test Task instances.
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    id: u64,
    name: String,
    project_id: Option<u64>,
    archived: bool,
}

impl TaskBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: format!("Task {}", id),
            project_id: None,
            archived: false,
        }
    }

    /// Set the task name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach the task to a project.
    pub fn project(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Mark the task archived.
    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }

    /// Build the Task instance.
    pub fn build(self) -> Task {
        Task {
            id: self.id,
            name: self.name,
            project_id: self.project_id,
            archived: self.archived,
        }
    }
}

// ============================================================================
// TimeEntryBuilder
// ============================================================================

/// Builder for creating test TimeEntry instances.
#[derive(Debug, Clone)]
pub struct TimeEntryBuilder {
    id: Option<u64>,
    task_id: u64,
    date: NaiveDate,
    start_time: String,
    end_time: String,
    duration_seconds: u64,
    note: Option<String>,
}

impl TimeEntryBuilder {
    /// Create a one-hour entry on the given task and day.
    pub fn new(task_id: u64, date: NaiveDate) -> Self {
        Self {
            id: None,
            task_id,
            date,
            start_time: "09:00:00".to_string(),
            end_time: "10:00:00".to_string(),
            duration_seconds: 3600,
            note: None,
        }
    }

    /// Set the entry ID.
    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the duration in seconds.
    pub fn duration(mut self, seconds: u64) -> Self {
        self.duration_seconds = seconds;
        self
    }

    /// Set the note.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Build the TimeEntry instance.
    pub fn build(self) -> TimeEntry {
        TimeEntry {
            id: self.id,
            task_id: self.task_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            duration_seconds: self.duration_seconds,
            note: self.note,
        }
    }
}

// ============================================================================
// Timer helpers
// ============================================================================

/// A running timer on the given task.
pub fn running_timer(timer_id: u64, task_id: u64, task_name: &str, started_at: &str) -> TimerState {
    TimerState {
        running: true,
        timer_id: Some(timer_id),
        task_id: Some(task_id),
        task_name: Some(task_name.to_string()),
        project_name: None,
        started_at: Some(started_at.to_string()),
    }
}

/// Parse a `YYYY-MM-DD` literal.
pub fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("fixture date must be YYYY-MM-DD")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_builder_defaults() {
        let project = ProjectBuilder::new(7).build();
        assert_eq!(project.name, "Project 7");
        assert!(!project.archived);
    }

    #[test]
    fn test_task_builder() {
        let task = TaskBuilder::new(3).name("Review").project(7).archived().build();
        assert_eq!(task.project_id, Some(7));
        assert!(task.archived);
    }

    #[test]
    fn test_entry_builder() {
        let entry = TimeEntryBuilder::new(3, day("2024-01-15"))
            .duration(1800)
            .note("pairing")
            .build();
        assert_eq!(entry.duration_seconds, 1800);
        assert_eq!(entry.note.as_deref(), Some("pairing"));
    }
}
