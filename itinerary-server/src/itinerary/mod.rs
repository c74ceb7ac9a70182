//! Itinerary reconstruction and transfer analysis.
//!
//! This module turns an [`AlternativePath`](crate::domain::AlternativePath)
//! from the routing backend into display segments:
//!
//! - [`compute_station_times`] interpolates a timestamp for every station of
//!   a ride
//! - [`reconstruct`] merges timed rides with the station-by-station path
//! - [`is_interchange`] and [`transfer_metrics`] decorate the result
//! - [`merge_station_times`] folds rides into a timeline one at a time
//! - [`classic_segments`] lays out an untimed shortest path the same way
//!
//! None of these operations fail: degraded input yields a degraded but
//! well-formed result.

mod alternatives;
mod classic;
mod config;
mod interpolate;
mod rank;
mod reconstruct;
mod registry;
mod summary;
mod transfer;

pub use alternatives::{AlternativeOverview, AlternativeSet, Itinerary};
pub use classic::classic_segments;
pub use config::ItineraryConfig;
pub use interpolate::compute_station_times;
pub use rank::rank_alternatives;
pub use reconstruct::{Inconsistency, Reconstruction, reconstruct};
pub use registry::{merge as merge_station_times, timeline};
pub use summary::{ItinerarySummary, distinct_stations};
pub use transfer::{
    FAST_STOP_SECS, NORMAL_STOP_SECS, PROGRESS_CEILING_SECS, ProgressBand, ProgressTone,
    TransferMetrics, Transition, is_interchange, metrics_for_temporal, transfer_count,
    transfer_metrics, transitions,
};
