//! Timer API trait

use async_trait::async_trait;

use crate::client::models::{StartTimer, StartedTimer, TimerState};
use crate::error::Result;

/// Timer operations for the TimeCamp API
#[async_trait]
pub trait TimerApi: Send + Sync {
    /// Current timer (`GET /timer_running`)
    async fn timer_status(&self) -> Result<TimerState>;

    /// Start a timer on a task (`POST /timer`)
    async fn start_timer(&self, request: &StartTimer) -> Result<StartedTimer>;

    /// Stop the running timer (`PUT /timer {action: stop}`)
    async fn stop_timer(&self) -> Result<()>;
}
