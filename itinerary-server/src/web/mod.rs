//! Web layer for the itinerary service.
//!
//! Provides HTTP endpoints for fetching alternatives and reconstructing
//! itineraries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
