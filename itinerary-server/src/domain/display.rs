//! Presentation-ready itinerary segments.
//!
//! A [`DisplaySegment`] is what the reconstruction produces: one ride, with
//! every station it passes through, a timestamp per station and, when the
//! ride is entered by changing line, the transfer that preceded it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Departure/arrival at one station. Either side may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationTime {
    pub departure: Option<String>,
    pub arrival: Option<String>,
}

impl StationTime {
    /// Departure only.
    pub fn departing(departure: Option<String>) -> Self {
        Self {
            departure,
            arrival: None,
        }
    }

    /// Arrival only.
    pub fn arriving(arrival: Option<String>) -> Self {
        Self {
            departure: None,
            arrival,
        }
    }

    /// Neither side known.
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Station name to its times.
///
/// Keys iterate (and serialize) in name order, not travel order. The
/// segment's `stations` list carries the travel order.
pub type StationTimes = BTreeMap<String, StationTime>;

/// The line change that leads into a display segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInfo {
    /// Walking time between platforms, seconds.
    pub transfer_time: u32,

    /// Platform wait after the walk, seconds.
    pub wait_time: u32,

    /// Where the change happens. Unknown only for a leading transfer in the
    /// two-station fallback.
    #[serde(rename = "transferStation")]
    pub transfer_station: Option<String>,

    #[serde(rename = "fromLine")]
    pub from_line: Option<String>,

    #[serde(rename = "toLine")]
    pub to_line: Option<String>,
}

impl TransferInfo {
    /// Transfer plus wait.
    pub fn stop_time(&self) -> u32 {
        self.transfer_time.saturating_add(self.wait_time)
    }
}

/// One ride of a reconstructed itinerary.
///
/// # Invariants
///
/// - `stations` holds no duplicate names, in travel order
/// - `stations_count == stations.len()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySegment {
    pub line: String,

    pub stations: Vec<String>,

    /// Riding time in seconds.
    pub duration: u32,

    #[serde(rename = "stationsCount")]
    pub stations_count: usize,

    pub departure_time: Option<String>,

    pub arrival_time: Option<String>,

    #[serde(rename = "stationTimes")]
    pub station_times: StationTimes,

    #[serde(rename = "transferInfo")]
    pub transfer_info: Option<TransferInfo>,
}

impl DisplaySegment {
    /// First station of the ride.
    pub fn first_station(&self) -> Option<&str> {
        self.stations.first().map(String::as_str)
    }

    /// Last station of the ride.
    pub fn last_station(&self) -> Option<&str> {
        self.stations.last().map(String::as_str)
    }

    /// True if this ride is entered by changing line.
    pub fn has_transfer(&self) -> bool {
        self.transfer_info.is_some()
    }
}
