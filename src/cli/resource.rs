//! Resource commands

use timecamp_mcp::error::Result;
use timecamp_mcp::server::RESOURCES;

use crate::cli::{CommandContext, OutputFormat};
use crate::output;

/// Read one resource and print it
pub async fn read(uri: &str, format: OutputFormat, config_path: Option<&str>, no_cache: bool) -> Result<()> {
    let ctx = CommandContext::new(format, config_path, no_cache)?;
    let response = ctx.server.read_resource(uri).await?;
    output::print(&response, ctx.format)
}

/// Print the resource catalogue
pub fn list(format: OutputFormat) -> Result<()> {
    output::print(RESOURCES, format)
}
