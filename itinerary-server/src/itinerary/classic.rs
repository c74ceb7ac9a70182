//! Display segments for an untimed shortest path.
//!
//! Each leg of the backend's `chemin` becomes one display segment as it
//! stands. There is nothing to interpolate and no transfer figures to
//! attach: station times are empty and `transfer_info` is `None`.

use crate::domain::{ClassicPath, DisplaySegment, StationTimes};

/// Convert the legs of a shortest path into display segments.
///
/// A leg without a line (a single-station path) gets an empty line name.
/// Repeated station names within a leg are kept once, in travel order.
pub fn classic_segments(path: &ClassicPath) -> Vec<DisplaySegment> {
    path.chemin
        .iter()
        .map(|leg| {
            let mut stations: Vec<String> = Vec::with_capacity(leg.stations.len());
            for station in &leg.stations {
                if !stations.contains(&station.name) {
                    stations.push(station.name.clone());
                }
            }

            DisplaySegment {
                line: leg.line.clone().unwrap_or_default(),
                stations_count: stations.len(),
                stations,
                duration: leg.duration,
                departure_time: None,
                arrival_time: None,
                station_times: StationTimes::new(),
                transfer_info: None,
            }
        })
        .collect()
}
