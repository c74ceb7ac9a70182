//! Routing backend client.
//!
//! The routing backend computes candidate paths between two stations and
//! returns them as [`AlternativePath`]s, or as one untimed [`ClassicPath`]
//! for the shortest-path search. This module talks to it over HTTP, or
//! serves canned answers from disk during development.
//!
//! Key characteristics of the backend:
//! - Departure and arrive-by queries go to different endpoints
//! - Times are "HH:MM", with 24-31 meaning the early hours of the next day
//! - A closed network answers with `service_info` and a suggested departure

mod client;
mod error;
mod mock;
mod types;

pub use client::{BackendClient, BackendConfig};
pub use error::BackendError;
pub use mock::MockBackendClient;
pub use types::{
    AlternativesRequest, AlternativesResponse, ErrorBody, ServiceInfo, ShortestPathRequest,
};

use crate::domain::{AlternativePath, ClassicPath, ItineraryQuery};

/// Either the live backend or the file-backed mock.
#[derive(Debug, Clone)]
pub enum Backend {
    Http(BackendClient),
    Mock(MockBackendClient),
}

impl Backend {
    /// Fetch alternative paths for a query.
    pub async fn get_alternatives(
        &self,
        query: &ItineraryQuery,
    ) -> Result<Vec<AlternativePath>, BackendError> {
        match self {
            Backend::Http(client) => client.get_alternatives(query).await,
            Backend::Mock(client) => client.get_alternatives(query).await,
        }
    }

    /// Fetch the untimed shortest path between two stations.
    pub async fn get_shortest_path(
        &self,
        start: &str,
        end: &str,
    ) -> Result<ClassicPath, BackendError> {
        match self {
            Backend::Http(client) => client.get_shortest_path(start, end).await,
            Backend::Mock(client) => client.get_shortest_path(start, end).await,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Backend::Http(_) => "http",
            Backend::Mock(_) => "mock",
        }
    }
}
