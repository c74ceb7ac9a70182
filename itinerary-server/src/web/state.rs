//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedBackend;
use crate::itinerary::ItineraryConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached routing backend
    pub backend: Arc<CachedBackend>,

    /// Query defaults and reconstruction options
    pub config: Arc<ItineraryConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(backend: CachedBackend, config: ItineraryConfig) -> Self {
        Self {
            backend: Arc::new(backend),
            config: Arc::new(config),
        }
    }
}
