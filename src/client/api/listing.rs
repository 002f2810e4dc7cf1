//! Listing API trait for project and task collections

use async_trait::async_trait;

use crate::client::models::{Project, Task};
use crate::error::Result;

/// Collection listing operations for the TimeCamp API
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// All projects, archived included (`GET /projects`)
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// All tasks, archived included (`GET /tasks`)
    async fn list_tasks(&self) -> Result<Vec<Task>>;
}
