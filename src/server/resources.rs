//! Resource URIs and their read handlers

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use super::TimeCampServer;
use super::params::{parse_date, validate_query};
use super::responses::{
    ChangesResponse, DailySummaryResponse, ProjectListResponse, ResourceResponse, SearchResponse,
    TaskInfo, TimerStatusResponse,
};
use crate::client::{EntryApi, TimeCampApi, TimerApi};
use crate::error::{Result, ValidationError};
use crate::search;

const SCHEME: &str = "timecamp://";

/// A parsed resource URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceUri {
    Projects,
    Tasks,
    Timer,
    TimeEntries(NaiveDate),
    Changes,
    /// Percent-decoded, trimmed query
    Search(String),
}

impl FromStr for ResourceUri {
    type Err = ValidationError;

    fn from_str(uri: &str) -> std::result::Result<Self, Self::Err> {
        let unknown = || ValidationError::new("uri", format!("Unknown resource: {}", uri));
        let path = uri.strip_prefix(SCHEME).ok_or_else(unknown)?;

        match path {
            "projects" => Ok(Self::Projects),
            "tasks" => Ok(Self::Tasks),
            "timer" => Ok(Self::Timer),
            "changes" => Ok(Self::Changes),
            _ => {
                if let Some(date) = path.strip_prefix("time-entries/") {
                    return parse_date(date).map(Self::TimeEntries);
                }
                if let Some(raw) = path.strip_prefix("search/") {
                    let decoded = urlencoding::decode(raw).map_err(|_| {
                        ValidationError::new("query", "Search query is not valid UTF-8")
                    })?;
                    return validate_query(&decoded).map(Self::Search);
                }
                Err(unknown())
            }
        }
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Projects => write!(f, "{}projects", SCHEME),
            Self::Tasks => write!(f, "{}tasks", SCHEME),
            Self::Timer => write!(f, "{}timer", SCHEME),
            Self::TimeEntries(date) => write!(f, "{}time-entries/{}", SCHEME, date.format("%Y-%m-%d")),
            Self::Changes => write!(f, "{}changes", SCHEME),
            Self::Search(query) => write!(f, "{}search/{}", SCHEME, query),
        }
    }
}

/// Advertised resource or resource template
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Every resource this adapter serves
pub const RESOURCES: &[ResourceDescriptor] = &[
    ResourceDescriptor {
        uri: "timecamp://projects",
        name: "projects",
        description: "All projects, archived included, with task counts",
    },
    ResourceDescriptor {
        uri: "timecamp://tasks",
        name: "tasks",
        description: "All tasks with their project names",
    },
    ResourceDescriptor {
        uri: "timecamp://timer",
        name: "timer",
        description: "Current timer status and elapsed time",
    },
    ResourceDescriptor {
        uri: "timecamp://time-entries/{date}",
        name: "time-entries",
        description: "Daily summary of time entries for a YYYY-MM-DD date",
    },
    ResourceDescriptor {
        uri: "timecamp://changes",
        name: "changes",
        description: "Recent timer starts, stops and created entries",
    },
    ResourceDescriptor {
        uri: "timecamp://search/{query}",
        name: "search",
        description: "Fuzzy search over project and task names",
    },
];

impl<C: TimeCampApi + 'static> TimeCampServer<C> {
    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ResourceResponse> {
        let uri: ResourceUri = uri.parse()?;
        log::debug!("Reading {}", uri);

        let response = match uri {
            ResourceUri::Projects => ResourceResponse::Projects(self.projects().await?),
            ResourceUri::Tasks => ResourceResponse::Tasks(self.tasks().await?),
            ResourceUri::Timer => ResourceResponse::Timer(self.timer().await?),
            ResourceUri::TimeEntries(date) => {
                ResourceResponse::TimeEntries(self.time_entries(date).await?)
            }
            ResourceUri::Changes => ResourceResponse::Changes(self.changes()),
            ResourceUri::Search(query) => ResourceResponse::Search(self.search(&query).await?),
        };
        Ok(response)
    }

    /// `timecamp://projects`
    pub async fn projects(&self) -> Result<ProjectListResponse> {
        let (projects, tasks) = self.warm_listings().await?;
        Ok(ProjectListResponse::build(&projects, &tasks))
    }

    /// `timecamp://tasks`
    pub async fn tasks(&self) -> Result<Vec<TaskInfo>> {
        let (projects, tasks) = self.warm_listings().await?;
        Ok(TaskInfo::enrich(&tasks, &projects))
    }

    /// `timecamp://timer`
    pub async fn timer(&self) -> Result<TimerStatusResponse> {
        let timer = self.client.timer_status().await?;
        Ok(TimerStatusResponse::from_state(&timer, self.clock.now()))
    }

    /// `timecamp://time-entries/{date}`
    pub async fn time_entries(&self, date: NaiveDate) -> Result<DailySummaryResponse> {
        let entries = self.client.list_time_entries(date).await?;
        let (projects, tasks) = self.warm_listings().await?;

        let timer = if date == self.clock.today() {
            Some(self.client.timer_status().await?)
        } else {
            None
        };

        Ok(DailySummaryResponse::build(
            date,
            &entries,
            &tasks,
            &projects,
            timer.as_ref(),
        ))
    }

    /// `timecamp://changes`
    pub fn changes(&self) -> ChangesResponse {
        ChangesResponse {
            changes: self.changes.recent(),
            timestamp: self.clock.now(),
        }
    }

    /// `timecamp://search/{query}`
    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        let query = validate_query(query)?;
        let (projects, tasks) = self.warm_listings().await?;

        let candidates = search::candidates(&projects, &tasks);
        let results = search::search(&query, &candidates);
        log::debug!("Search {:?}: {} of {} candidates", query, results.len(), candidates.len());

        Ok(SearchResponse {
            total_results: results.len(),
            results,
            query,
        })
    }
}
