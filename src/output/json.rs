//! JSON output formatting

use chrono::Utc;
use serde::Serialize;
use timecamp_mcp::error::ToolFailure;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Wrapper for a failed command
#[derive(Debug, Serialize)]
pub struct JsonFailure<'a> {
    pub error: &'a ToolFailure,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// Adapter version
    pub version: String,
}

impl Metadata {
    fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata::now(),
        }
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(data);
    serde_json::to_string_pretty(&output)
}

/// Format a failure as pretty-printed JSON
pub fn format_failure(failure: &ToolFailure) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonFailure {
        error: failure,
        meta: Metadata::now(),
    })
}
