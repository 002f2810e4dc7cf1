//! Tool and resource handlers
//!
//! [`TimeCampServer`] owns everything a request needs: the cached client,
//! the change log and the clock. Resources are read-only; tools are the only
//! handlers that mutate TimeCamp, and each one invalidates the cache entries
//! it makes stale before recording a change event.

pub mod params;
pub mod resources;
pub mod responses;
pub mod tools;

use std::sync::Arc;

use crate::cache::CachedTimeCampClient;
use crate::changes::ChangeLog;
use crate::client::models::{Project, Task};
use crate::client::{ListingApi, TimeCampApi};
use crate::clock::Clock;
use crate::config::Config;
use crate::error::Result;

pub use resources::{RESOURCES, ResourceDescriptor, ResourceUri};
pub use responses::{ResourceResponse, ToolResponse};
pub use tools::{ToolDescriptor, tool_descriptors};

/// Request handling context
pub struct TimeCampServer<C: TimeCampApi> {
    client: CachedTimeCampClient<C>,
    changes: ChangeLog,
    clock: Arc<dyn Clock>,
}

impl<C: TimeCampApi + 'static> TimeCampServer<C> {
    pub fn new(client: CachedTimeCampClient<C>, changes: ChangeLog, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            changes,
            clock,
        }
    }

    /// Wire up a server around `inner` using the configured TTLs and
    /// change-log capacity.
    pub fn from_config(inner: C, config: &Config, clock: Arc<dyn Clock>, cache_enabled: bool) -> Self {
        let client = CachedTimeCampClient::new(inner, config.cache_ttl(), clock.clone(), cache_enabled);
        Self::new(client, ChangeLog::new(config.change_log_capacity), clock)
    }

    /// The cached client
    pub fn client(&self) -> &CachedTimeCampClient<C> {
        &self.client
    }

    /// The change log
    pub fn change_log(&self) -> &ChangeLog {
        &self.changes
    }

    /// Projects and tasks, fetched concurrently on a cache miss.
    async fn warm_listings(&self) -> Result<(Vec<Project>, Vec<Task>)> {
        futures::try_join!(self.client.list_projects(), self.client.list_tasks())
    }
}
