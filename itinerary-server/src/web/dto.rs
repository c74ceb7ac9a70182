//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{
    DisplaySegment, SortCriterion, StationTimes, TimeType, TransferInfo, format_duration_secs,
};
use crate::itinerary::{
    AlternativeOverview, Inconsistency, Itinerary, ItinerarySummary, ProgressTone,
    TransferMetrics, Transition, is_interchange, transfer_metrics,
};

/// Request for alternative itineraries.
#[derive(Debug, Deserialize)]
pub struct AlternativesRequest {
    pub start_station: String,

    pub end_station: String,

    /// "HH:MM", hours 24-31 meaning the next day
    pub time: String,

    /// "YYYY-MM-DD", defaults to the backend's today
    pub date: Option<String>,

    #[serde(default)]
    pub time_type: TimeType,

    #[serde(default)]
    pub sort_by: SortCriterion,

    pub max_paths: Option<usize>,

    /// Longest acceptable platform wait (seconds)
    pub max_wait_time: Option<u32>,

    /// Index of the alternative to reconstruct in full
    pub select: Option<usize>,
}

/// Request for the untimed shortest path.
#[derive(Debug, Deserialize)]
pub struct ShortestPathQuery {
    /// Station identifier as the routing backend knows it
    pub start: String,

    pub end: String,
}

/// Overview of every alternative, plus the selected one in full.
#[derive(Debug, Serialize)]
pub struct AlternativesResponse {
    pub alternatives: Vec<AlternativeOverview>,
    pub selected: Option<ItineraryView>,
}

/// A reconstructed itinerary ready for display.
#[derive(Debug, Serialize)]
pub struct ItineraryView {
    pub segments: Vec<SegmentView>,
    pub summary: ItinerarySummary,
    pub transitions: Vec<Transition>,
    pub inconsistencies: Vec<Inconsistency>,
    pub timeline: StationTimes,
}

/// One ride of an itinerary.
#[derive(Debug, Serialize)]
pub struct SegmentView {
    pub line: String,

    pub stations: Vec<StationView>,

    /// Riding time (seconds)
    pub duration: u32,

    #[serde(rename = "stationsCount")]
    pub stations_count: usize,

    pub departure_time: Option<String>,

    pub arrival_time: Option<String>,

    #[serde(rename = "transferInfo")]
    pub transfer_info: Option<TransferInfo>,

    /// The change after this ride, if any
    pub transfer: Option<TransferView>,
}

/// A station along a ride.
#[derive(Debug, Serialize)]
pub struct StationView {
    pub name: String,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub is_interchange: bool,
}

/// Stop-time figures for a line change.
#[derive(Debug, Serialize)]
pub struct TransferView {
    #[serde(flatten)]
    pub metrics: TransferMetrics,

    pub tone: ProgressTone,

    /// CSS colour for the progress indicator
    pub color: &'static str,

    /// Human-readable stop time (e.g. "3min 20s")
    pub label: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Earliest departure the routing backend suggests instead
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_departure: Option<String>,
}

// Conversion implementations

impl ItineraryView {
    /// Create from a reconstructed itinerary.
    pub fn from_itinerary(itinerary: Itinerary) -> Self {
        let segments = itinerary
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| SegmentView::from_segment(&itinerary.segments, i, segment))
            .collect();

        Self {
            segments,
            summary: itinerary.summary,
            transitions: itinerary.transitions,
            inconsistencies: itinerary.inconsistencies,
            timeline: itinerary.timeline,
        }
    }
}

impl SegmentView {
    /// Create from the display segment at `index` of `segments`.
    fn from_segment(segments: &[DisplaySegment], index: usize, segment: &DisplaySegment) -> Self {
        let stations = segment
            .stations
            .iter()
            .enumerate()
            .map(|(station_index, name)| {
                let times = segment.station_times.get(name);
                StationView {
                    name: name.clone(),
                    departure: times.and_then(|t| t.departure.clone()),
                    arrival: times.and_then(|t| t.arrival.clone()),
                    is_interchange: is_interchange(segments, index, station_index),
                }
            })
            .collect();

        Self {
            line: segment.line.clone(),
            stations,
            duration: segment.duration,
            stations_count: segment.stations_count,
            departure_time: segment.departure_time.clone(),
            arrival_time: segment.arrival_time.clone(),
            transfer_info: segment.transfer_info.clone(),
            transfer: TransferView::from_metrics(transfer_metrics(segments, index)),
        }
    }
}

impl TransferView {
    /// `None` when there is no stop time to show.
    fn from_metrics(metrics: TransferMetrics) -> Option<Self> {
        let total = metrics.total_stop_time?;
        let tone = metrics.tone();
        Some(Self {
            tone,
            color: tone.color(),
            label: format_duration_secs(total),
            metrics,
        })
    }
}
