//! TimeCamp API client

pub mod api;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod timecamp;

pub use api::{EntryApi, ListingApi, TimerApi};
#[cfg(test)]
pub use mock::MockTimeCampClient;
pub use timecamp::TimeCampClient;

/// Combined TimeCamp API surface.
///
/// Implemented automatically for anything that implements all of the
/// sub-traits, so the HTTP client, the cached wrapper and test mocks are
/// interchangeable.
pub trait TimeCampApi: TimerApi + ListingApi + EntryApi {}

impl<T: TimerApi + ListingApi + EntryApi> TimeCampApi for T {}
