//! Headline figures for a reconstructed itinerary.

use serde::Serialize;

use super::transfer_count;
use crate::domain::{AlternativePath, ClassicPath, DisplaySegment};

/// Duration, emissions and size of one itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItinerarySummary {
    /// Total duration in seconds, as reported by the routing backend.
    pub duration: u32,

    /// Grams of CO2.
    pub emissions: f64,

    /// Distinct stations visited.
    #[serde(rename = "stationsCount")]
    pub stations_count: usize,

    pub transfers: usize,

    /// Lines ridden, in order of first use.
    pub lines: Vec<String>,
}

impl ItinerarySummary {
    pub fn new(path: &AlternativePath, segments: &[DisplaySegment]) -> Self {
        Self {
            duration: path.total_duration,
            emissions: path.emissions,
            stations_count: distinct_stations(segments),
            transfers: transfer_count(segments),
            lines: lines_ridden(segments),
        }
    }

    /// Figures for an untimed shortest path.
    ///
    /// Such a path carries no transfer records, so `transfers` counts line
    /// changes. The backend's own station count is used when it sent one.
    pub fn from_classic(path: &ClassicPath, segments: &[DisplaySegment]) -> Self {
        let stations_count = match path.stations_count {
            0 => distinct_stations(segments),
            n => n,
        };

        Self {
            duration: path.duration_secs(),
            emissions: path.emissions,
            stations_count,
            transfers: segments.len().saturating_sub(1),
            lines: lines_ridden(segments),
        }
    }
}

/// Stations shared by consecutive rides count once.
pub fn distinct_stations(segments: &[DisplaySegment]) -> usize {
    let mut seen = std::collections::HashSet::new();
    segments
        .iter()
        .flat_map(|s| &s.stations)
        .filter(|station| seen.insert(station.as_str()))
        .count()
}

fn lines_ridden(segments: &[DisplaySegment]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for segment in segments {
        if !lines.contains(&segment.line) {
            lines.push(segment.line.clone());
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StructuralSegment, TemporalSegment};
    use crate::itinerary::reconstruct;

    #[test]
    fn counts_shared_stations_once() {
        let temporal = vec![
            TemporalSegment::new("1", "A", "C"),
            TemporalSegment::new("2", "C", "D").with_transfer(120, 0),
            TemporalSegment::new("1", "D", "E").with_transfer(60, 30),
        ];
        let structural = vec![
            StructuralSegment::new("1", "A", "B"),
            StructuralSegment::new("1", "B", "C"),
            StructuralSegment::new("2", "C", "D"),
            StructuralSegment::new("1", "D", "E"),
        ];
        let mut path = AlternativePath::new(temporal, Some(structural));
        path.total_duration = 1500;
        path.emissions = 12.5;

        let segments = reconstruct(path.temporal_segments(), path.structural()).segments;
        let summary = ItinerarySummary::new(&path, &segments);

        assert_eq!(summary.duration, 1500);
        assert_eq!(summary.emissions, 12.5);
        assert_eq!(summary.stations_count, 5);
        assert_eq!(summary.transfers, 2);
        assert_eq!(summary.lines, ["1", "2"]);
    }

    #[test]
    fn classic_summary() {
        use crate::domain::ClassicLeg;
        use crate::itinerary::classic_segments;

        let mut path = ClassicPath::new(vec![
            ClassicLeg::new("7", &["A", "B"], 300),
            ClassicLeg::new("6", &["B", "C", "D"], 600),
        ]);
        path.duration = 899.6;
        path.emissions = 4.2;

        let segments = classic_segments(&path);
        let summary = ItinerarySummary::from_classic(&path, &segments);
        assert_eq!(summary.duration, 900);
        assert_eq!(summary.emissions, 4.2);
        assert_eq!(summary.stations_count, 4);
        assert_eq!(summary.transfers, 1);
        assert_eq!(summary.lines, ["7", "6"]);

        path.stations_count = 5;
        assert_eq!(ItinerarySummary::from_classic(&path, &segments).stations_count, 5);
    }

    #[test]
    fn empty_itinerary() {
        let path = AlternativePath::new(vec![], None);
        let summary = ItinerarySummary::new(&path, &[]);
        assert_eq!(summary.stations_count, 0);
        assert_eq!(summary.transfers, 0);
        assert!(summary.lines.is_empty());
    }

    #[test]
    fn serializes_stations_count() {
        let path = AlternativePath::new(vec![TemporalSegment::new("1", "A", "B")], None);
        let segments = reconstruct(path.temporal_segments(), None).segments;
        let value = serde_json::to_value(ItinerarySummary::new(&path, &segments)).unwrap();
        assert_eq!(value["stationsCount"], 2);
    }
}
