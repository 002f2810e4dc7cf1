//! TimeCamp time tracking exposed as assistant tools and resources
//!
//! The HTTP client talks to the TimeCamp API, the cache keeps listings
//! around for a short TTL, and [`server::TimeCampServer`] turns resource
//! reads and tool calls into typed responses.

pub mod cache;
pub mod changes;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod search;
pub mod server;

pub use error::{Error, ErrorKind, Result, ToolFailure};
pub use server::TimeCampServer;
