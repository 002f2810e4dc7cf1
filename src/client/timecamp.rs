//! TimeCamp API client implementation

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::{EntryApi, ListingApi, TimerApi};
use super::models::de::keyed_collection;
use super::models::{
    CreatedEntry, NewTimeEntry, Project, StartTimer, StartedTimer, Task, TimeEntry, TimerState,
};
use crate::error::{ApiError, Result};

/// TimeCamp API base URL
pub const API_BASE_URL: &str = "https://www.timecamp.com/third_party/api";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Wait suggested on a 429 without a usable `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// TimeCamp API client
pub struct TimeCampClient {
    http: HttpClient,
    base_url: String,
    api_token: String,
}

impl TimeCampClient {
    /// Create a new TimeCamp API client against the public API
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_options(api_token, API_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit base URL and request timeout
    pub fn with_options(
        api_token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated API request and decode the JSON body.
    ///
    /// An empty body decodes as `null`.
    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("Authorization", &self.api_token)
            .header("Accept", "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;

        // Handle response status
        let status = response.status();
        if status.is_success() {
            let text = response.text().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to read response: {}", e))
            })?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
            });
        }

        warn!("TimeCamp answered {} for {} {}", status, method, path);
        let err = match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => {
                let error_msg = body_or(response, "Resource not found").await;
                ApiError::NotFound(error_msg)
            }
            StatusCode::CONFLICT => {
                let error_msg = body_or(response, "Request conflicts with current state").await;
                ApiError::Conflict(error_msg)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                ApiError::RateLimit(Duration::from_secs(retry_after))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = body_or(response, "Bad request").await;
                ApiError::BadRequest(error_msg)
            }
            status if status.is_server_error() => {
                ApiError::ServerError(format!("TimeCamp returned {}. Try again later", status))
            }
            _ => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
        };
        Err(err.into())
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.request::<Value>(Method::GET, path, query, None).await
    }

    fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
        serde_json::from_value(value).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse {}: {}", what, e)).into()
        })
    }

    fn decode_collection<T: DeserializeOwned>(value: Value, what: &str) -> Result<Vec<T>> {
        Ok(keyed_collection(value, "id", what))
    }
}

/// Response body text, or a fallback when it is empty or unreadable.
async fn body_or(response: reqwest::Response, fallback: &str) -> String {
    match response.text().await {
        Ok(text) if !text.trim().is_empty() => text,
        _ => fallback.to_string(),
    }
}

#[async_trait]
impl TimerApi for TimeCampClient {
    async fn timer_status(&self) -> Result<TimerState> {
        let body = self.get("timer_running", &[]).await?;
        TimerState::from_response(body).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse timer status: {}", e)).into()
        })
    }

    async fn start_timer(&self, request: &StartTimer) -> Result<StartedTimer> {
        let body = self
            .request(Method::POST, "timer", &[], Some(request))
            .await?;
        if body.is_null() {
            return Ok(StartedTimer::default());
        }
        Self::decode(body, "timer start response")
    }

    async fn stop_timer(&self) -> Result<()> {
        #[derive(Serialize)]
        struct StopTimer {
            action: &'static str,
        }

        self.request(Method::PUT, "timer", &[], Some(&StopTimer { action: "stop" }))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ListingApi for TimeCampClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let body = self.get("projects", &[]).await?;
        Self::decode_collection(body, "projects")
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let body = self.get("tasks", &[]).await?;
        Self::decode_collection(body, "tasks")
    }
}

#[async_trait]
impl EntryApi for TimeCampClient {
    async fn list_time_entries(&self, date: NaiveDate) -> Result<Vec<TimeEntry>> {
        let day = date.format("%Y-%m-%d").to_string();
        let body = self
            .get("time_entries", &[("from", day.clone()), ("to", day)])
            .await?;
        Self::decode_collection(body, "time entries")
    }

    async fn create_time_entry(&self, entry: &NewTimeEntry) -> Result<CreatedEntry> {
        let body = self
            .request(Method::POST, "time_entries", &[], Some(entry))
            .await?;
        if body.is_null() {
            return Ok(CreatedEntry::default());
        }
        Self::decode(body, "time entry response")
    }
}
