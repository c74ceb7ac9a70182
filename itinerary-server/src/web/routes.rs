//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::backend::BackendError;
use crate::domain::{AlternativePath, ItineraryQuery, QueryError};
use crate::itinerary::{AlternativeSet, Itinerary};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/itinerary/reconstruct", post(reconstruct_itinerary))
        .route("/itinerary/alternatives", post(get_alternatives))
        .route("/itinerary/shortest-path", post(get_shortest_path))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(
            error = %e,
            body = %String::from_utf8_lossy(body),
            "Rejected request body"
        );
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Reconstruct a single alternative path sent by the client.
async fn reconstruct_itinerary(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ItineraryView>, AppError> {
    let path: AlternativePath = parse_body(&body)?;
    let itinerary = Itinerary::from_path(&path, &state.config);
    Ok(Json(ItineraryView::from_itinerary(itinerary)))
}

/// Fetch alternatives for a query and reconstruct the selected one.
async fn get_alternatives(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AlternativesResponse>, AppError> {
    let req: AlternativesRequest = parse_body(&body)?;
    let query = build_query(&req, &state)?;

    let paths = state.backend.get_alternatives(&query).await?;
    let set = AlternativeSet::new(
        paths.as_ref().clone(),
        query.sort_by(),
        &state.config,
    );

    info!(
        start = %query.start_station(),
        end = %query.end_station(),
        time = %query.time(),
        alternatives = set.len(),
        "Alternatives found"
    );

    let selected = match req.select {
        Some(index) => Some(set.select(index).ok_or_else(|| AppError::NotFound {
            message: format!("No alternative {index} (found {})", set.len()),
        })?),
        None => set.select(0),
    };

    Ok(Json(AlternativesResponse {
        alternatives: set.summaries(),
        selected: selected.map(ItineraryView::from_itinerary),
    }))
}

/// Fetch the untimed shortest path between two stations.
async fn get_shortest_path(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ItineraryView>, AppError> {
    let req: ShortestPathQuery = parse_body(&body)?;

    let start = req.start.trim();
    let end = req.end.trim();
    if start.is_empty() {
        return Err(QueryError::MissingStation("start").into());
    }
    if end.is_empty() {
        return Err(QueryError::MissingStation("end").into());
    }

    let path = state.backend.get_shortest_path(start, end).await?;
    let itinerary = Itinerary::from_classic(&path);

    info!(
        start,
        end,
        legs = itinerary.segments.len(),
        "Shortest path found"
    );

    Ok(Json(ItineraryView::from_itinerary(itinerary)))
}

/// Validate a request into a backend query, filling in configured defaults.
fn build_query(req: &AlternativesRequest, state: &AppState) -> Result<ItineraryQuery, AppError> {
    let mut query = ItineraryQuery::new(&req.start_station, &req.end_station, &req.time)?
        .with_time_type(req.time_type)
        .with_sort_by(req.sort_by)
        .with_max_paths(req.max_paths.unwrap_or(state.config.default_max_paths))?
        .with_max_wait_time(req.max_wait_time.unwrap_or(state.config.default_max_wait_secs));

    if let Some(date) = &req.date {
        query = query.with_date(date)?;
    }

    Ok(query)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        message: String,
    },
    NotFound {
        message: String,
    },
    ServiceUnavailable {
        message: String,
        suggested_departure: Option<String>,
    },
    BadGateway {
        message: String,
    },
    Internal {
        message: String,
    },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NoItinerary => AppError::NotFound {
                message: e.to_string(),
            },
            BackendError::ServiceUnavailable {
                message,
                suggested_departure,
            } => AppError::ServiceUnavailable {
                message,
                suggested_departure,
            },
            BackendError::Http(_) | BackendError::Json { .. } | BackendError::Api { .. } => {
                AppError::BadGateway {
                    message: e.to_string(),
                }
            }
            BackendError::MockData(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::ServiceUnavailable {
                message,
                suggested_departure,
            } => ErrorResponse {
                error: message,
                suggested_departure,
            },
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::BadGateway { message }
            | AppError::Internal { message } => ErrorResponse {
                error: message,
                suggested_departure: None,
            },
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %body.error, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %body.error, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}
