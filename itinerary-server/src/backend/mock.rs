//! Mock routing backend for development without a running backend.
//!
//! Loads canned alternatives from JSON files and serves them as if they were
//! live responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::{AlternativePath, ClassicPath, ItineraryQuery};

use super::error::BackendError;

/// Route key: lowercased (start, end) station names.
type RouteKey = (String, String);

fn route_key(start: &str, end: &str) -> RouteKey {
    (start.trim().to_lowercase(), end.trim().to_lowercase())
}

/// One mock file: what the backend answers between two stations.
#[derive(Debug, Deserialize)]
struct MockRoute {
    start_station: String,
    end_station: String,

    #[serde(default)]
    paths: Vec<AlternativePath>,

    /// Answer of the untimed shortest-path search, if any.
    #[serde(default)]
    shortest_path: Option<ClassicPath>,
}

/// Mock backend that serves alternatives from JSON files.
///
/// Query time, date and sort order are ignored; the stored paths for the
/// station pair are returned, truncated to `max_paths`. Shortest-path
/// lookups match station names where the live backend expects identifiers.
#[derive(Debug, Clone)]
pub struct MockBackendClient {
    routes: Arc<RwLock<HashMap<RouteKey, MockRoute>>>,
}

impl MockBackendClient {
    /// Create a mock client by loading every `.json` file in a directory.
    ///
    /// Each file holds `{start_station, end_station, paths, shortest_path?}`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, BackendError> {
        let routes = load_routes(data_dir.as_ref())?;
        Ok(Self {
            routes: Arc::new(RwLock::new(routes)),
        })
    }

    /// Alternatives for the query's station pair.
    pub async fn get_alternatives(
        &self,
        query: &ItineraryQuery,
    ) -> Result<Vec<AlternativePath>, BackendError> {
        let routes = self.routes.read().await;
        let key = route_key(query.start_station(), query.end_station());

        let paths = routes
            .get(&key)
            .map(|route| &route.paths)
            .ok_or(BackendError::NoItinerary)?;
        if paths.is_empty() {
            return Err(BackendError::NoItinerary);
        }

        Ok(paths.iter().take(query.max_paths()).cloned().collect())
    }

    /// Shortest path between two stations.
    pub async fn get_shortest_path(
        &self,
        start: &str,
        end: &str,
    ) -> Result<ClassicPath, BackendError> {
        let routes = self.routes.read().await;
        routes
            .get(&route_key(start, end))
            .and_then(|route| route.shortest_path.clone())
            .filter(|path| !path.chemin.is_empty())
            .ok_or(BackendError::NoItinerary)
    }

    /// Station pairs with mock data.
    pub async fn available_routes(&self) -> Vec<(String, String)> {
        let routes = self.routes.read().await;
        let mut keys: Vec<_> = routes.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Reload mock data from disk.
    pub async fn reload(&self, data_dir: impl AsRef<Path>) -> Result<(), BackendError> {
        let fresh = load_routes(data_dir.as_ref())?;
        *self.routes.write().await = fresh;
        Ok(())
    }
}

fn load_routes(data_dir: &Path) -> Result<HashMap<RouteKey, MockRoute>, BackendError> {
    let mut routes = HashMap::new();

    let entries = std::fs::read_dir(data_dir).map_err(|e| {
        BackendError::MockData(format!("Failed to read mock data directory: {e}"))
    })?;

    for entry in entries {
        let entry = entry
            .map_err(|e| BackendError::MockData(format!("Failed to read directory entry: {e}")))?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let json = std::fs::read_to_string(&path)
            .map_err(|e| BackendError::MockData(format!("Failed to read {path:?}: {e}")))?;

        let route: MockRoute = serde_json::from_str(&json)
            .map_err(|e| BackendError::MockData(format!("Failed to parse {path:?}: {e}")))?;

        routes.insert(route_key(&route.start_station, &route.end_station), route);
    }

    if routes.is_empty() {
        return Err(BackendError::MockData(format!(
            "No mock route files found in {data_dir:?}"
        )));
    }

    Ok(routes)
}
