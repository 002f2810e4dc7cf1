//! Project and task models

use serde::{Deserialize, Serialize};

use super::de::{flag_bool, flexible_opt_u64, flexible_u64};

/// Colour TimeCamp shows for projects without one
pub const DEFAULT_PROJECT_COLOR: &str = "#4CAF50";

/// TimeCamp project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID
    #[serde(deserialize_with = "flexible_u64")]
    pub id: u64,

    /// Project name
    pub name: String,

    /// Display colour (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Whether the project is archived (`"1"` upstream)
    #[serde(default, deserialize_with = "flag_bool")]
    pub archived: bool,

    /// Parent project, for nested projects
    #[serde(
        default,
        deserialize_with = "flexible_opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<u64>,

    /// Number of tasks belonging to this project, filled in locally
    #[serde(default)]
    pub task_count: usize,
}

impl Project {
    /// Colour to display, falling back to the TimeCamp default.
    pub fn display_color(&self) -> &str {
        self.color
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_PROJECT_COLOR)
    }
}

/// TimeCamp task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task ID
    #[serde(deserialize_with = "flexible_u64")]
    pub id: u64,

    /// Task name
    pub name: String,

    /// Owning project (absent for top-level tasks)
    #[serde(
        default,
        deserialize_with = "flexible_opt_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<u64>,

    /// Whether the task is archived
    #[serde(default, deserialize_with = "flag_bool")]
    pub archived: bool,
}

/// Fill in `task_count` for every project from a task list.
pub fn count_tasks(projects: &mut [Project], tasks: &[Task]) {
    for project in projects.iter_mut() {
        project.task_count = tasks
            .iter()
            .filter(|t| t.project_id == Some(project.id))
            .count();
    }
}
