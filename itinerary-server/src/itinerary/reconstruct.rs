//! Merging timed rides with the station-by-station path.
//!
//! The routing backend describes a route twice: as timed rides, one per line
//! ([`TemporalSegment`]), and as a fine-grained hop list
//! ([`StructuralSegment`]). The two sequences do not share indices. This
//! module walks both in lockstep and produces one [`DisplaySegment`] per
//! ride, carrying every station it passes through.
//!
//! Reconstruction never fails. Cross-segment disagreements are returned as
//! [`Inconsistency`] values alongside the segments and logged at `warn`.

use serde::Serialize;
use tracing::{debug, warn};

use super::compute_station_times;
use crate::domain::{DisplaySegment, StructuralSegment, TemporalSegment, TransferInfo};

/// A non-fatal disagreement found while reconstructing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inconsistency {
    /// The station a transfer is declared at (end of the previous ride) is
    /// not where the next ride starts. The declared station is kept.
    TransferStationMismatch {
        segment_index: usize,
        declared: String,
        first_station: Option<String>,
    },

    /// The structural path left the ride's line, or ran out, before reaching
    /// the ride's destination. The station list was truncated there and the
    /// destination appended.
    StructuralDivergence {
        segment_index: usize,
        line: String,
        expected_destination: String,
        /// Line of the structural hop that stopped the walk, `None` if the
        /// structural path was exhausted.
        diverging_line: Option<String>,
    },
}

/// Output of [`reconstruct`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconstruction {
    pub segments: Vec<DisplaySegment>,
    pub inconsistencies: Vec<Inconsistency>,
}

impl Reconstruction {
    /// True if no inconsistency was found.
    pub fn is_consistent(&self) -> bool {
        self.inconsistencies.is_empty()
    }
}

/// Merge timed rides with an optional structural path.
///
/// With no structural path (or an empty one) every ride becomes a
/// two-station segment. Otherwise a cursor walks the structural path,
/// collecting the stations of each ride while the hop's line matches.
///
/// An empty structural path counts as absent. It therefore keeps a transfer
/// declared on the first ride, which a walked path drops, and records no
/// divergence.
///
/// Entering a ride with a non-zero transfer time attaches a
/// [`TransferInfo`] located at the last station of the previous ride.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::{StructuralSegment, TemporalSegment};
/// use itinerary_server::itinerary::reconstruct;
///
/// let temporal = vec![
///     TemporalSegment::new("1", "A", "C").with_times("08:00:00", "08:10:00"),
///     TemporalSegment::new("2", "C", "D")
///         .with_times("08:15:00", "08:20:00")
///         .with_transfer(120, 60),
/// ];
/// let structural = vec![
///     StructuralSegment::new("1", "A", "B"),
///     StructuralSegment::new("1", "B", "C"),
///     StructuralSegment::new("2", "C", "D"),
/// ];
///
/// let result = reconstruct(&temporal, Some(&structural));
/// assert_eq!(result.segments[0].stations, ["A", "B", "C"]);
/// assert_eq!(result.segments[1].stations, ["C", "D"]);
///
/// let transfer = result.segments[1].transfer_info.as_ref().unwrap();
/// assert_eq!(transfer.transfer_station.as_deref(), Some("C"));
/// assert!(result.is_consistent());
/// ```
pub fn reconstruct(
    temporal: &[TemporalSegment],
    structural: Option<&[StructuralSegment]>,
) -> Reconstruction {
    let mut inconsistencies = Vec::new();
    let structural = structural.filter(|path| !path.is_empty());

    let segments = match structural {
        Some(path) => {
            debug!(
                rides = temporal.len(),
                hops = path.len(),
                "Reconstructing from structural path"
            );
            walk_structural(temporal, path, &mut inconsistencies)
        }
        None => {
            debug!(rides = temporal.len(), "No structural path, using ride endpoints");
            temporal
                .iter()
                .map(|ride| {
                    display_segment(ride, vec![ride.from_station.clone(), ride.to_station.clone()])
                })
                .collect()
        }
    };

    let segments = attach_transfers(
        temporal,
        segments,
        structural.is_none(),
        &mut inconsistencies,
    );

    for inconsistency in &inconsistencies {
        warn!(?inconsistency, "Itinerary inconsistency");
    }

    Reconstruction {
        segments,
        inconsistencies,
    }
}

/// Collect each ride's stations by advancing a cursor over `path`.
fn walk_structural(
    temporal: &[TemporalSegment],
    path: &[StructuralSegment],
    inconsistencies: &mut Vec<Inconsistency>,
) -> Vec<DisplaySegment> {
    let mut cursor = 0;
    let mut segments = Vec::with_capacity(temporal.len());

    for (index, ride) in temporal.iter().enumerate() {
        let mut stations = vec![ride.from_station.clone()];
        let mut reached = false;
        let mut diverging_line = None;

        while let Some(hop) = path.get(cursor) {
            if hop.line != ride.line {
                diverging_line = Some(hop.line.clone());
                break;
            }

            if !stations.contains(&hop.to_station) {
                stations.push(hop.to_station.clone());
            }
            cursor += 1;

            if hop.to_station == ride.to_station {
                reached = true;
                break;
            }
        }

        if !reached {
            inconsistencies.push(Inconsistency::StructuralDivergence {
                segment_index: index,
                line: ride.line.clone(),
                expected_destination: ride.to_station.clone(),
                diverging_line,
            });
        }

        if !stations.contains(&ride.to_station) {
            stations.push(ride.to_station.clone());
        }

        segments.push(display_segment(ride, stations));
    }

    segments
}

fn display_segment(ride: &TemporalSegment, stations: Vec<String>) -> DisplaySegment {
    let station_times = compute_station_times(
        &stations,
        ride.departure_time.as_deref(),
        ride.arrival_time.as_deref(),
    );

    DisplaySegment {
        line: ride.line.clone(),
        stations_count: stations.len(),
        stations,
        duration: ride.travel_time,
        departure_time: ride.departure_time.clone(),
        arrival_time: ride.arrival_time.clone(),
        station_times,
        transfer_info: None,
    }
}

/// Attach transfer info to every ride entered with a non-zero transfer time.
///
/// The transfer is located at the last station of the previous ride. A
/// leading transfer has no previous ride; it is kept, with only its
/// durations, when `keep_leading` is set.
fn attach_transfers(
    temporal: &[TemporalSegment],
    mut segments: Vec<DisplaySegment>,
    keep_leading: bool,
    inconsistencies: &mut Vec<Inconsistency>,
) -> Vec<DisplaySegment> {
    for (index, ride) in temporal.iter().enumerate() {
        if ride.transfer_time == 0 {
            continue;
        }

        let previous = index
            .checked_sub(1)
            .and_then(|i| segments.get(i))
            .map(|prev| (prev.last_station().map(str::to_string), prev.line.clone()));

        let Some(segment) = segments.get_mut(index) else {
            continue;
        };

        let info = match previous {
            Some((transfer_station, from_line)) => {
                if let Some(declared) = &transfer_station {
                    if segment.first_station() != Some(declared.as_str()) {
                        inconsistencies.push(Inconsistency::TransferStationMismatch {
                            segment_index: index,
                            declared: declared.clone(),
                            first_station: segment.first_station().map(str::to_string),
                        });
                    }
                }

                TransferInfo {
                    transfer_time: ride.transfer_time,
                    wait_time: ride.wait_time,
                    transfer_station,
                    from_line: Some(from_line),
                    to_line: Some(segment.line.clone()),
                }
            }
            None if keep_leading => TransferInfo {
                transfer_time: ride.transfer_time,
                wait_time: ride.wait_time,
                transfer_station: None,
                from_line: None,
                to_line: None,
            },
            None => continue,
        };

        segment.transfer_info = Some(info);
    }

    segments
}

#[cfg(test)]
#[path = "reconstruct_tests.rs"]
mod tests;
