//! CLI command definitions and handlers
//!
//! A driver for the handlers: read one resource or call one tool and exit,
//! or `serve` many requests from stdin against one long-lived server.

use clap::{Parser, Subcommand, ValueEnum};

pub mod context;
pub mod resource;
pub mod serve;
pub mod tool;

pub use context::CommandContext;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Payload only, pretty-printed
    #[default]
    Pretty,
    /// Payload wrapped with response metadata
    Json,
}

/// timecamp-mcp - TimeCamp time tracking as assistant tools and resources
#[derive(Parser, Debug)]
#[command(name = "timecamp-mcp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "TIMECAMP_MCP_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "TIMECAMP_MCP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TIMECAMP_MCP_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "TIMECAMP_MCP_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a resource, e.g. timecamp://projects
    Read {
        /// Resource URI
        uri: String,
    },

    /// Call a tool with JSON arguments
    Call {
        /// Tool name (start_timer, stop_timer, create_time_entry)
        tool: String,

        /// Arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// List available resources
    Resources,

    /// List available tools and their parameter schemas
    Tools,

    /// Answer line-delimited JSON requests from stdin until it closes
    Serve,
}
