//! Route payloads produced by the routing backend.
//!
//! An [`AlternativePath`] carries two independent descriptions of the same
//! route: a coarse per-line list of timed rides ([`TemporalSegment`]) and a
//! fine-grained station-by-station path ([`StructuralSegment`]). Neither
//! shares indices with the other.

use serde::{Deserialize, Deserializer, Serialize};

use super::normalize_overnight;

/// Treat an explicit JSON `null` like a missing field.
pub(super) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One hop of the structural path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralSegment {
    pub line: String,
    pub from_station: String,
    pub to_station: String,
}

impl StructuralSegment {
    pub fn new(
        line: impl Into<String>,
        from_station: impl Into<String>,
        to_station: impl Into<String>,
    ) -> Self {
        Self {
            line: line.into(),
            from_station: from_station.into(),
            to_station: to_station.into(),
        }
    }
}

/// One real-world-timed ride on a single line.
///
/// Times are kept as the backend sent them ("HH:MM:SS", possibly absent);
/// durations are whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalSegment {
    pub line: String,
    pub from_station: String,
    pub to_station: String,

    #[serde(default)]
    pub departure_time: Option<String>,

    #[serde(default)]
    pub arrival_time: Option<String>,

    /// Riding time in seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub travel_time: u32,

    /// Time spent walking between lines before this ride, in seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub transfer_time: u32,

    /// Time spent waiting on the platform before this ride, in seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub wait_time: u32,
}

impl TemporalSegment {
    /// A ride with no times and no transfer.
    pub fn new(
        line: impl Into<String>,
        from_station: impl Into<String>,
        to_station: impl Into<String>,
    ) -> Self {
        Self {
            line: line.into(),
            from_station: from_station.into(),
            to_station: to_station.into(),
            departure_time: None,
            arrival_time: None,
            travel_time: 0,
            transfer_time: 0,
            wait_time: 0,
        }
    }

    /// Set departure and arrival times.
    pub fn with_times(mut self, departure: &str, arrival: &str) -> Self {
        self.departure_time = Some(departure.to_string());
        self.arrival_time = Some(arrival.to_string());
        self
    }

    /// Set the transfer and wait times preceding this ride.
    pub fn with_transfer(mut self, transfer_time: u32, wait_time: u32) -> Self {
        self.transfer_time = transfer_time;
        self.wait_time = wait_time;
        self
    }

    /// Set the riding time.
    pub fn with_travel_time(mut self, travel_time: u32) -> Self {
        self.travel_time = travel_time;
        self
    }
}

/// One candidate route returned by the routing backend.
///
/// Immutable once received; every selection reconstructs from it afresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativePath {
    /// Timed rides. The backend occasionally sends `null` here.
    #[serde(default)]
    pub segments: Option<Vec<TemporalSegment>>,

    /// Station-by-station path, when the backend had one.
    #[serde(default)]
    pub structural_path: Option<Vec<StructuralSegment>>,

    /// Total duration in seconds.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_duration: u32,

    /// Estimated emissions in grams of CO2.
    #[serde(default, deserialize_with = "null_as_default")]
    pub emissions: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_wait_time: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
}

impl AlternativePath {
    /// Build a path from its two route descriptions.
    pub fn new(
        segments: Vec<TemporalSegment>,
        structural_path: Option<Vec<StructuralSegment>>,
    ) -> Self {
        Self {
            segments: Some(segments),
            structural_path,
            total_duration: 0,
            emissions: 0.0,
            total_wait_time: None,
            departure_time: None,
            arrival_time: None,
        }
    }

    /// Timed rides, empty when the backend sent none.
    pub fn temporal_segments(&self) -> &[TemporalSegment] {
        self.segments.as_deref().unwrap_or_default()
    }

    /// Structural path, `None` when absent.
    pub fn structural(&self) -> Option<&[StructuralSegment]> {
        self.structural_path.as_deref()
    }

    /// Copy of this path with overnight times ("24:10:00") folded back onto
    /// the clock. Unparseable times are left untouched.
    pub fn with_overnight_normalized(&self) -> Self {
        let fold = |t: &Option<String>| -> Option<String> {
            t.as_ref()
                .map(|s| normalize_overnight(s).unwrap_or_else(|| s.clone()))
        };

        let mut path = self.clone();
        if let Some(segments) = path.segments.as_mut() {
            for segment in segments.iter_mut() {
                segment.departure_time = fold(&segment.departure_time);
                segment.arrival_time = fold(&segment.arrival_time);
            }
        }
        path.departure_time = fold(&path.departure_time);
        path.arrival_time = fold(&path.arrival_time);
        path
    }
}
