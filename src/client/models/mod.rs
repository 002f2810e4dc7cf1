//! TimeCamp API data models
//!
//! Typed records for everything the adapter reads from or sends to TimeCamp.

pub mod de;
mod entry;
mod project;
mod timer;

pub use entry::{CreatedEntry, NewTimeEntry, TimeEntry};
pub use project::{DEFAULT_PROJECT_COLOR, Project, Task, count_tasks};
pub use timer::{StartTimer, StartedTimer, TimerState};
