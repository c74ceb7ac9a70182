//! Domain types for the itinerary service.
//!
//! This module contains the route payloads received from the routing
//! backend, the display model produced by reconstruction, validated user
//! queries, and clock-time handling shared by all of them.

mod classic;
mod display;
mod error;
mod query;
mod segment;
mod time;

pub use classic::{ClassicLeg, ClassicPath, ClassicStation};
pub use display::{DisplaySegment, StationTime, StationTimes, TransferInfo};
pub use error::QueryError;
pub use query::{
    DEFAULT_MAX_PATHS, DEFAULT_MAX_WAIT_TIME, ItineraryQuery, MAX_PATHS_LIMIT, SortCriterion,
    TimeType,
};
pub use segment::{AlternativePath, StructuralSegment, TemporalSegment};
pub use time::{
    ClockTime, QueryTime, TimeError, format_duration_secs, normalize_overnight, reference_date,
};
