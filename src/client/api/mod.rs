//! API trait definitions split by responsibility
//!
//! This module organizes the TimeCamp API surface into focused sub-traits:
//! - [`TimerApi`] - Live timer status and start/stop
//! - [`ListingApi`] - Project and task collections
//! - [`EntryApi`] - Time entries per day
//!
//! The [`TimeCampApi`](super::TimeCampApi) super-trait combines all three.

mod entry;
mod listing;
mod timer;

pub use entry::EntryApi;
pub use listing::ListingApi;
pub use timer::TimerApi;
