//! Wire types for the routing backend's endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::{AlternativePath, ItineraryQuery, TimeType};

/// Body of `POST /temporal/alternatives` and `/temporal/alternatives-arrival`.
///
/// Exactly one of `departure_time` and `arrival_time` is set, matching the
/// endpoint the request is sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativesRequest {
    pub start_station: String,
    pub end_station: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,

    /// "YYYY-MM-DD"; the backend uses today when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    pub max_paths: usize,
    pub max_wait_time: u32,
    pub sort_by: &'static str,
}

impl From<&ItineraryQuery> for AlternativesRequest {
    fn from(query: &ItineraryQuery) -> Self {
        let time = query.time().to_string();
        let (departure_time, arrival_time) = match query.time_type() {
            TimeType::Departure => (Some(time), None),
            TimeType::Arrival => (None, Some(time)),
        };

        Self {
            start_station: query.start_station().to_string(),
            end_station: query.end_station().to_string(),
            departure_time,
            arrival_time,
            date: query.date().map(|d| d.format("%Y-%m-%d").to_string()),
            max_paths: query.max_paths(),
            max_wait_time: query.max_wait_time(),
            sort_by: query.sort_by().as_str(),
        }
    }
}

/// Body of `POST /shortest-path`: the two station identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPathRequest {
    pub start: String,
    pub end: String,
}

/// Successful response body.
#[derive(Debug, Clone, Deserialize)]
pub struct AlternativesResponse {
    #[serde(default)]
    pub paths: Vec<AlternativePath>,

    /// Echo of the request plus backend bookkeeping; not interpreted.
    #[serde(default)]
    pub request_info: serde_json::Value,
}

/// Error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub service_info: Option<ServiceInfo>,
}

/// Why the network is not running at the requested time.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub message: Option<String>,

    /// First departure the backend would suggest instead.
    #[serde(default)]
    pub suggested_departure: Option<String>,
}
