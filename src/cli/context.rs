//! Command execution context
//!
//! Loads configuration, checks the token and wires the HTTP client, cache
//! and change log into a [`TimeCampServer`].

use std::path::Path;
use std::sync::Arc;

use timecamp_mcp::TimeCampServer;
use timecamp_mcp::client::TimeCampClient;
use timecamp_mcp::clock::SystemClock;
use timecamp_mcp::config::Config;
use timecamp_mcp::error::Result;

use crate::cli::OutputFormat;

/// Context for command execution containing the server and runtime options.
pub struct CommandContext {
    /// Request handlers over the cached client
    pub server: TimeCampServer<TimeCampClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded or the API token is missing.
    pub fn new(format: OutputFormat, config_path: Option<&str>, no_cache: bool) -> Result<Self> {
        let config = Config::load(config_path.map(Path::new))?;
        log::debug!("Loaded config: {:?}", config);

        let token = config.require_token()?;
        let client = TimeCampClient::with_options(token, &config.api_url, config.request_timeout())?;
        let server = TimeCampServer::from_config(client, &config, Arc::new(SystemClock), !no_cache);

        Ok(Self { server, format })
    }
}
