//! Tool commands

use serde_json::Value;
use timecamp_mcp::error::{Result, ValidationError};
use timecamp_mcp::server::tool_descriptors;

use crate::cli::{CommandContext, OutputFormat};
use crate::output;

/// Call one tool and print its result
pub async fn call(
    tool: &str,
    args: &str,
    format: OutputFormat,
    config_path: Option<&str>,
    no_cache: bool,
) -> Result<()> {
    // Bad JSON is rejected before a token is even needed
    let args: Value = serde_json::from_str(args)
        .map_err(|e| ValidationError::new("arguments", format!("not valid JSON: {}", e)))?;

    let ctx = CommandContext::new(format, config_path, no_cache)?;
    let response = ctx.server.call_tool(tool, args).await?;
    output::print(&response, ctx.format)
}

/// Print the tool catalogue with parameter schemas
pub fn list(format: OutputFormat) -> Result<()> {
    output::print(&tool_descriptors()?, format)
}
