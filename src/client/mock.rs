//! Mock TimeCamp API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls. The timer is stateful: starting sets a
//! running timer, stopping clears it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use super::api::{EntryApi, ListingApi, TimerApi};
use super::models::{
    CreatedEntry, NewTimeEntry, Project, StartTimer, StartedTimer, Task, TimeEntry, TimerState,
};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockTimeCampClient::new()
///     .with_projects(vec![ProjectBuilder::new(1).name("Frontend").build()])
///     .await;
///
/// let projects = mock.list_projects().await?;
/// assert_eq!(projects.len(), 1);
/// ```
pub struct MockTimeCampClient {
    /// Projects to return from list_projects
    projects: Arc<Mutex<Vec<Project>>>,
    /// Tasks to return from list_tasks
    tasks: Arc<Mutex<Vec<Task>>>,
    /// Time entries per day
    entries: Arc<Mutex<HashMap<NaiveDate, Vec<TimeEntry>>>>,
    /// Current timer state
    timer: Arc<Mutex<TimerState>>,
    /// Timer ID handed out by start_timer
    next_timer_id: Arc<Mutex<u64>>,
    /// Entry ID handed out by create_time_entry
    next_entry_id: Arc<Mutex<u64>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Errors pinned to one operation - each consumed on first use
    op_errors: Arc<Mutex<HashMap<MockOp, ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured mutation requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockTimeCampClient {
    fn default() -> Self {
        Self {
            projects: Arc::new(Mutex::new(Vec::new())),
            tasks: Arc::new(Mutex::new(Vec::new())),
            entries: Arc::new(Mutex::new(HashMap::new())),
            timer: Arc::new(Mutex::new(TimerState::idle())),
            next_timer_id: Arc::new(Mutex::new(1000)),
            next_entry_id: Arc::new(Mutex::new(5000)),
            error: Arc::new(Mutex::new(None)),
            op_errors: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub timer_status: usize,
    pub start_timer: usize,
    pub stop_timer: usize,
    pub list_projects: usize,
    pub list_tasks: usize,
    pub list_time_entries: usize,
    pub create_time_entry: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.timer_status
            + self.start_timer
            + self.stop_timer
            + self.list_projects
            + self.list_tasks
            + self.list_time_entries
            + self.create_time_entry
    }
}

/// API operation an injected error can be pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    TimerStatus,
    StartTimer,
    StopTimer,
    ListProjects,
    ListTasks,
    ListTimeEntries,
    CreateTimeEntry,
}

/// A captured mutation request for test assertions.
#[derive(Debug, Clone)]
pub enum CapturedRequest {
    StartTimer(StartTimer),
    StopTimer,
    CreateTimeEntry(NewTimeEntry),
}

impl MockTimeCampClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure projects to return from list_projects.
    pub async fn with_projects(self, projects: Vec<Project>) -> Self {
        *self.projects.lock().await = projects;
        self
    }

    /// Configure tasks to return from list_tasks.
    pub async fn with_tasks(self, tasks: Vec<Task>) -> Self {
        *self.tasks.lock().await = tasks;
        self
    }

    /// Configure entries to return for a day.
    pub async fn with_entries(self, date: NaiveDate, entries: Vec<TimeEntry>) -> Self {
        self.entries.lock().await.insert(date, entries);
        self
    }

    /// Configure the current timer state.
    pub async fn with_timer(self, timer: TimerState) -> Self {
        *self.timer.lock().await = timer;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Queue an error for the next API call on an existing mock.
    pub async fn fail_next(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// Configure an error for the next call of one operation only.
    pub async fn with_error_on(self, op: MockOp, error: ApiError) -> Self {
        self.op_errors.lock().await.insert(op, error);
        self
    }

    /// Replace the projects returned from list_projects.
    pub async fn set_projects(&self, projects: Vec<Project>) {
        *self.projects.lock().await = projects;
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error for `op` and consume it.
    async fn check_error(&self, op: MockOp) -> Result<()> {
        if let Some(e) = self.op_errors.lock().await.remove(&op) {
            return Err(e.into());
        }
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn capture_request(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }
}

// ============================================================================
// TimerApi Implementation
// ============================================================================

#[async_trait]
impl TimerApi for MockTimeCampClient {
    async fn timer_status(&self) -> Result<TimerState> {
        self.call_count.lock().await.timer_status += 1;
        self.check_error(MockOp::TimerStatus).await?;

        Ok(self.timer.lock().await.clone())
    }

    async fn start_timer(&self, request: &StartTimer) -> Result<StartedTimer> {
        self.call_count.lock().await.start_timer += 1;
        self.capture_request(CapturedRequest::StartTimer(request.clone()))
            .await;
        self.check_error(MockOp::StartTimer).await?;

        let timer_id = {
            let mut next = self.next_timer_id.lock().await;
            *next += 1;
            *next
        };
        let task_name = self
            .tasks
            .lock()
            .await
            .iter()
            .find(|t| t.id == request.task_id)
            .map(|t| t.name.clone());

        *self.timer.lock().await = TimerState {
            running: true,
            timer_id: Some(timer_id),
            task_id: Some(request.task_id),
            task_name,
            project_name: None,
            started_at: Some(request.started_at.clone()),
        };

        Ok(StartedTimer {
            timer_id: Some(timer_id),
        })
    }

    async fn stop_timer(&self) -> Result<()> {
        self.call_count.lock().await.stop_timer += 1;
        self.capture_request(CapturedRequest::StopTimer).await;
        self.check_error(MockOp::StopTimer).await?;

        *self.timer.lock().await = TimerState::idle();
        Ok(())
    }
}

// ============================================================================
// ListingApi Implementation
// ============================================================================

#[async_trait]
impl ListingApi for MockTimeCampClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.call_count.lock().await.list_projects += 1;
        self.check_error(MockOp::ListProjects).await?;

        Ok(self.projects.lock().await.clone())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.call_count.lock().await.list_tasks += 1;
        self.check_error(MockOp::ListTasks).await?;

        Ok(self.tasks.lock().await.clone())
    }
}

// ============================================================================
// EntryApi Implementation
// ============================================================================

#[async_trait]
impl EntryApi for MockTimeCampClient {
    async fn list_time_entries(&self, date: NaiveDate) -> Result<Vec<TimeEntry>> {
        self.call_count.lock().await.list_time_entries += 1;
        self.check_error(MockOp::ListTimeEntries).await?;

        Ok(self
            .entries
            .lock()
            .await
            .get(&date)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<CreatedEntry> {
        self.call_count.lock().await.create_time_entry += 1;
        self.capture_request(CapturedRequest::CreateTimeEntry(entry.clone()))
            .await;
        self.check_error(MockOp::CreateTimeEntry).await?;

        let entry_id = {
            let mut next = self.next_entry_id.lock().await;
            *next += 1;
            *next
        };

        let created = TimeEntry {
            id: Some(entry_id),
            task_id: entry.task_id,
            date: entry.date,
            start_time: entry.start_time.clone(),
            end_time: entry.end_time.clone(),
            duration_seconds: entry.duration,
            note: entry.note.clone(),
        };
        self.entries
            .lock()
            .await
            .entry(entry.date)
            .or_default()
            .push(created);

        Ok(CreatedEntry {
            entry_id: Some(entry_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{ProjectBuilder, TaskBuilder, day};

    #[tokio::test]
    async fn test_mock_returns_configured_projects() {
        let mock = MockTimeCampClient::new()
            .with_projects(vec![ProjectBuilder::new(1).name("Frontend").build()])
            .await;

        let projects = mock.list_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(mock.call_counts().await.list_projects, 1);
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockTimeCampClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        assert!(mock.list_tasks().await.is_err());
        assert!(mock.list_tasks().await.is_ok());
        assert_eq!(mock.call_counts().await.list_tasks, 2);
    }

    #[tokio::test]
    async fn test_mock_error_pinned_to_operation() {
        let mock = MockTimeCampClient::new()
            .with_error_on(MockOp::StopTimer, ApiError::NotFound("timer".into()))
            .await;

        assert!(mock.timer_status().await.is_ok());
        assert!(mock.stop_timer().await.is_err());
        assert!(mock.stop_timer().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_timer_is_stateful() {
        let mock = MockTimeCampClient::new()
            .with_tasks(vec![TaskBuilder::new(42).name("Review").build()])
            .await;

        let started = mock
            .start_timer(&StartTimer {
                task_id: 42,
                started_at: "2024-01-15T09:00:00".into(),
                note: None,
            })
            .await
            .unwrap();
        assert!(started.timer_id.is_some());

        let status = mock.timer_status().await.unwrap();
        assert!(status.running);
        assert_eq!(status.task_name.as_deref(), Some("Review"));

        mock.stop_timer().await.unwrap();
        assert!(!mock.timer_status().await.unwrap().running);
        assert_eq!(mock.captured_requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_created_entry_is_listed() {
        let mock = MockTimeCampClient::new();
        let date = day("2024-01-15");

        mock.create_time_entry(&NewTimeEntry {
            task_id: 1,
            date,
            start_time: "09:00:00".into(),
            end_time: "10:00:00".into(),
            duration: 3600,
            note: None,
        })
        .await
        .unwrap();

        let entries = mock.list_time_entries(date).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(mock.call_counts().await.total(), 2);
    }
}
