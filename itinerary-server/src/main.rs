use std::net::SocketAddr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use itinerary_server::backend::{Backend, BackendClient, BackendConfig, MockBackendClient};
use itinerary_server::cache::{CacheConfig, CachedBackend};
use itinerary_server::itinerary::ItineraryConfig;
use itinerary_server::web::{AppState, create_router};

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Serve canned data when a mock directory is given
    let backend = match std::env::var("MOCK_ALTERNATIVES_DIR") {
        Ok(dir) => {
            let mock = MockBackendClient::new(&dir).expect("Failed to load mock alternatives");
            info!(dir = %dir, routes = mock.available_routes().await.len(), "Using mock backend");
            Backend::Mock(mock)
        }
        Err(_) => {
            let base_url = std::env::var("ROUTING_BACKEND_URL").unwrap_or_else(|_| {
                warn!("ROUTING_BACKEND_URL not set, using the local default");
                BackendConfig::default().base_url
            });

            let mut config = BackendConfig::new(base_url);
            if let Some(secs) = std::env::var("ROUTING_BACKEND_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
            {
                config = config.with_timeout(secs);
            }

            info!(url = %config.base_url, timeout_secs = config.timeout_secs, "Using routing backend");
            Backend::Http(BackendClient::new(config).expect("Failed to create backend client"))
        }
    };

    let cache_config = CacheConfig::default().with_ttl(Duration::from_secs(300));
    let cached_backend = CachedBackend::new(backend, &cache_config);
    info!(
        backend = cached_backend.backend().kind(),
        ttl_secs = cache_config.ttl.as_secs(),
        "Routing backend ready"
    );

    let itinerary_config = ItineraryConfig::default();

    let state = AppState::new(cached_backend, itinerary_config);
    let app = create_router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .expect("BIND_ADDR must be host:port");

    info!(%addr, "Itinerary server listening");
    info!("  GET  /health                  - Health check");
    info!("  POST /itinerary/reconstruct   - Reconstruct one alternative path");
    info!("  POST /itinerary/alternatives  - Fetch and rank alternatives");
    info!("  POST /itinerary/shortest-path - Untimed shortest path");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server stopped");
    }
}
