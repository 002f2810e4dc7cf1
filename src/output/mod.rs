//! Output formatting for command results

use serde::Serialize;
use timecamp_mcp::error::{Result, ToolFailure};

use crate::cli::OutputFormat;

pub mod json;

/// Render data according to the requested format
pub fn render<T: Serialize + ?Sized>(data: &T, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(data)?,
        OutputFormat::Json => json::format_json(data)?,
    };
    Ok(rendered)
}

/// Format and print data to stdout
pub fn print<T: Serialize + ?Sized>(data: &T, format: OutputFormat) -> Result<()> {
    println!("{}", render(data, format)?);
    Ok(())
}

/// Print a structured failure to stdout
pub fn print_failure(failure: &ToolFailure, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(failure)?,
        OutputFormat::Json => json::format_failure(failure)?,
    };
    println!("{}", rendered);
    Ok(())
}
