//! Configuration management for the TimeCamp adapter
//!
//! Settings come from an optional YAML file, then environment overrides.
//! The API token is only ever read from the environment and never written
//! anywhere.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::CacheTtl;
use crate::changes::DEFAULT_CAPACITY;
use crate::client::timecamp::{API_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{ConfigError, Result};

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "TIMECAMP_API_TOKEN";
/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "TIMECAMP_API_URL";
/// Environment variable overriding the project/task cache TTL, in seconds
pub const CACHE_TTL_ENV: &str = "CACHE_TTL";
/// Environment variable pointing at an alternative config file
pub const CONFIG_PATH_ENV: &str = "TIMECAMP_MCP_CONFIG";

/// Application configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// TimeCamp API token, from the environment only
    #[serde(skip)]
    pub api_token: Option<String>,

    /// TimeCamp API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Cache lifetimes
    #[serde(default)]
    pub cache: CacheConfig,

    /// Number of change events kept for `timecamp://changes`
    #[serde(default = "default_change_log_capacity")]
    pub change_log_capacity: usize,
}

/// Cache lifetimes, in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Projects and tasks
    #[serde(default = "default_entity_ttl_secs")]
    pub entity_ttl_secs: u64,

    /// Time entries
    #[serde(default = "default_entries_ttl_secs")]
    pub entries_ttl_secs: u64,
}

fn default_api_url() -> String {
    API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_entity_ttl_secs() -> u64 {
    CacheTtl::ENTITIES.as_secs()
}

fn default_entries_ttl_secs() -> u64 {
    CacheTtl::ENTRIES.as_secs()
}

fn default_change_log_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entity_ttl_secs: default_entity_ttl_secs(),
            entries_ttl_secs: default_entries_ttl_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            cache: CacheConfig::default(),
            change_log_capacity: default_change_log_capacity(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cache", &self.cache)
            .field("change_log_capacity", &self.change_log_capacity)
            .finish()
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".timecamp-mcp").join("config.yaml"))
    }

    /// Load configuration from `path` (or the default location), then apply
    /// environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        let mut config = Self::load_from(&path)?;
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path. A missing file yields the
    /// defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).map(|t| t.trim().to_string())
            && !token.is_empty()
        {
            self.api_token = Some(token);
        }

        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(CACHE_TTL_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.cache.entity_ttl_secs = secs,
                Err(_) => log::warn!("Ignoring {}={:?}: not a number of seconds", CACHE_TTL_ENV, raw),
            }
        }
    }

    /// Reject settings the adapter cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.change_log_capacity == 0 {
            return Err(ConfigError::Invalid("change_log_capacity must be at least 1".into()).into());
        }
        if self.cache.entity_ttl_secs == 0 || self.cache.entries_ttl_secs == 0 {
            return Err(ConfigError::Invalid("cache TTLs must be at least 1 second".into()).into());
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("request_timeout_secs must be at least 1".into()).into());
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_url must be an http(s) URL, got {}",
                self.api_url
            ))
            .into());
        }
        Ok(())
    }

    /// The API token, or `MissingApiToken` when it was not provided
    pub fn require_token(&self) -> Result<&str> {
        self.api_token
            .as_deref()
            .ok_or_else(|| ConfigError::MissingApiToken.into())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_ttl(&self) -> CacheTtl {
        CacheTtl {
            entities: Duration::from_secs(self.cache.entity_ttl_secs),
            entries: Duration::from_secs(self.cache.entries_ttl_secs),
        }
    }
}
