//! Error types for the TimeCamp adapter

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Suggested wait before retrying when TimeCamp reports a 5xx.
const UNAVAILABLE_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Top-level error type for the adapter
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// API-related errors, one variant per upstream failure class
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API token. Check TimeCamp settings.")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("TimeCamp unavailable: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to TimeCamp".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TIMECAMP_API_TOKEN environment variable not set")]
    MissingApiToken,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Malformed caller input, rejected before any network call
#[derive(Debug, Error)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// User-facing failure classes surfaced by tools and resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AuthMissing,
    AuthInvalid,
    NotFound,
    Conflict,
    RateLimited,
    UpstreamUnavailable,
    ValidationError,
    Internal,
}

impl Error {
    /// Classify this error into the user-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Api(api) => match api {
                ApiError::Unauthorized => ErrorKind::AuthInvalid,
                ApiError::NotFound(_) => ErrorKind::NotFound,
                ApiError::Conflict(_) => ErrorKind::Conflict,
                ApiError::RateLimit(_) => ErrorKind::RateLimited,
                ApiError::BadRequest(_) => ErrorKind::ValidationError,
                ApiError::ServerError(_) | ApiError::Network(_) => ErrorKind::UpstreamUnavailable,
                ApiError::InvalidResponse(_) => ErrorKind::Internal,
            },
            Error::Config(ConfigError::MissingApiToken) => ErrorKind::AuthMissing,
            Error::Config(_) => ErrorKind::Internal,
            Error::Validation(_) => ErrorKind::ValidationError,
            Error::Io(_) | Error::Json(_) => ErrorKind::Internal,
        }
    }

    /// Suggested wait before the caller tries again, if any.
    ///
    /// Nothing is retried here; retry policy belongs to the caller.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::Api(ApiError::RateLimit(wait)) => Some(*wait),
            Error::Api(ApiError::ServerError(_) | ApiError::Network(_)) => {
                Some(UNAVAILABLE_RETRY_AFTER)
            }
            _ => None,
        }
    }
}

/// Structured failure payload handed back to the calling assistant
#[derive(Debug, Clone, Serialize)]
pub struct ToolFailure {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<u64>,
}

impl From<&Error> for ToolFailure {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            retry_after_secs: err.retry_after().map(|d| d.as_secs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized;
        assert!(err.to_string().contains("Invalid API token"));
    }

    #[test]
    fn test_api_error_not_found() {
        let err = ApiError::NotFound("task 42".to_string());
        assert!(err.to_string().contains("task 42"));
    }

    #[test]
    fn test_api_error_rate_limit() {
        let err = ApiError::RateLimit(Duration::from_secs(30));
        let msg = err.to_string();
        assert!(msg.contains("Rate limit"));
        assert!(msg.contains("30"));
    }

    #[test]
    fn test_config_error_missing_token() {
        let err = ConfigError::MissingApiToken;
        assert!(err.to_string().contains("TIMECAMP_API_TOKEN"));
    }

    #[test]
    fn test_validation_error_message() {
        let err = ValidationError::new("date", "expected YYYY-MM-DD");
        assert_eq!(err.to_string(), "Invalid date: expected YYYY-MM-DD");
    }

    #[test]
    fn test_kind_mapping() {
        let cases: Vec<(Error, ErrorKind)> = vec![
            (ConfigError::MissingApiToken.into(), ErrorKind::AuthMissing),
            (ApiError::Unauthorized.into(), ErrorKind::AuthInvalid),
            (ApiError::NotFound("x".into()).into(), ErrorKind::NotFound),
            (ApiError::Conflict("x".into()).into(), ErrorKind::Conflict),
            (
                ApiError::RateLimit(Duration::from_secs(1)).into(),
                ErrorKind::RateLimited,
            ),
            (
                ApiError::ServerError("x".into()).into(),
                ErrorKind::UpstreamUnavailable,
            ),
            (
                ApiError::Network("x".into()).into(),
                ErrorKind::UpstreamUnavailable,
            ),
            (
                ValidationError::new("task_id", "must be positive").into(),
                ErrorKind::ValidationError,
            ),
            (
                ApiError::InvalidResponse("x".into()).into(),
                ErrorKind::Internal,
            ),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "wrong kind for {err}");
        }
    }

    #[test]
    fn test_retry_after_suggestions() {
        let limited: Error = ApiError::RateLimit(Duration::from_secs(60)).into();
        assert_eq!(limited.retry_after(), Some(Duration::from_secs(60)));

        let down: Error = ApiError::ServerError("502".into()).into();
        assert_eq!(down.retry_after(), Some(UNAVAILABLE_RETRY_AFTER));

        let invalid: Error = ValidationError::new("date", "bad").into();
        assert_eq!(invalid.retry_after(), None);
    }

    #[test]
    fn test_tool_failure_serialization() {
        let err: Error = ApiError::RateLimit(Duration::from_secs(60)).into();
        let failure = ToolFailure::from(&err);
        let json = serde_json::to_value(&failure).unwrap();

        assert_eq!(json["kind"], "rate_limited");
        assert_eq!(json["retry_after_secs"], 60);
    }

    #[test]
    fn test_tool_failure_omits_missing_retry() {
        let err: Error = ApiError::Conflict("No timer is currently running".into()).into();
        let json = serde_json::to_value(ToolFailure::from(&err)).unwrap();

        assert_eq!(json["kind"], "conflict");
        assert!(json.get("retry_after_secs").is_none());
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
