//! Routing backend HTTP client.
//!
//! Forwards itinerary queries to the routing backend's alternatives and
//! shortest-path endpoints and decodes the returned paths.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::domain::{AlternativePath, ClassicPath, ItineraryQuery, TimeType};

use super::error::BackendError;
use super::types::{AlternativesRequest, AlternativesResponse, ErrorBody, ShortestPathRequest};

/// Default base URL of a locally running routing backend.
const DEFAULT_BASE_URL: &str = "http://localhost:5050";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Error bodies are truncated to this many characters.
const MAX_BODY_CHARS: usize = 500;

/// Configuration for the routing backend client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, without the `/temporal` prefix
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Create a config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }
}

/// Routing backend API client.
///
/// Uses a semaphore to limit concurrent requests; path search on the
/// backend is expensive.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl BackendClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// URL of the endpoint serving `time_type` queries.
    fn endpoint(&self, time_type: TimeType) -> String {
        match time_type {
            TimeType::Departure => format!("{}/temporal/alternatives", self.base_url),
            TimeType::Arrival => format!("{}/temporal/alternatives-arrival", self.base_url),
        }
    }

    /// URL of the untimed shortest-path search.
    fn shortest_path_endpoint(&self) -> String {
        format!("{}/shortest-path", self.base_url)
    }

    /// Fetch alternative paths for a query.
    ///
    /// Paths come back in the backend's order; ranking is the caller's job.
    pub async fn get_alternatives(
        &self,
        query: &ItineraryQuery,
    ) -> Result<Vec<AlternativePath>, BackendError> {
        let url = self.endpoint(query.time_type());
        let request = AlternativesRequest::from(query);

        debug!(
            url = %url,
            start = %request.start_station,
            end = %request.end_station,
            "Requesting alternatives"
        );

        let parsed: AlternativesResponse = self.post(&url, &request).await?;

        debug!(paths = parsed.paths.len(), "Received alternatives");

        if parsed.paths.is_empty() {
            return Err(BackendError::NoItinerary);
        }

        Ok(parsed.paths)
    }

    /// Fetch the untimed shortest path between two station identifiers.
    pub async fn get_shortest_path(
        &self,
        start: &str,
        end: &str,
    ) -> Result<ClassicPath, BackendError> {
        let url = self.shortest_path_endpoint();
        let request = ShortestPathRequest {
            start: start.to_string(),
            end: end.to_string(),
        };

        debug!(url = %url, start, end, "Requesting shortest path");

        let path: ClassicPath = self.post(&url, &request).await?;

        debug!(legs = path.chemin.len(), "Received shortest path");

        if path.chemin.is_empty() {
            return Err(BackendError::NoItinerary);
        }

        Ok(path)
    }

    /// POST `body` as JSON and decode the JSON answer.
    async fn post<B, R>(&self, url: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| BackendError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = error_from_status(status, &body);
            warn!(status = status.as_u16(), error = %err, "Routing backend refused query");
            return Err(err);
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| BackendError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(MAX_BODY_CHARS).collect()),
        })
    }
}

/// Map a non-success response to an error.
///
/// A body carrying `service_info` means the network is closed at the
/// requested time, whatever the status code.
fn error_from_status(status: StatusCode, body: &str) -> BackendError {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();

    if let Some(info) = parsed.as_ref().and_then(|b| b.service_info.as_ref()) {
        return BackendError::ServiceUnavailable {
            message: info
                .message
                .clone()
                .or_else(|| parsed.as_ref().and_then(|b| b.error.clone()))
                .unwrap_or_else(|| "service not running".to_string()),
            suggested_departure: info.suggested_departure.clone(),
        };
    }

    if status == StatusCode::NOT_FOUND {
        return BackendError::NoItinerary;
    }

    let message = parsed
        .and_then(|b| b.error)
        .unwrap_or_else(|| body.chars().take(MAX_BODY_CHARS).collect());

    BackendError::Api {
        status: status.as_u16(),
        message,
    }
}
