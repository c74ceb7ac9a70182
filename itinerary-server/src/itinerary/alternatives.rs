//! Alternative paths for one query, and the itinerary built from a selection.
//!
//! Selecting an alternative always reconstructs from the immutable
//! [`AlternativePath`]; nothing from a previous selection is reused.

use serde::Serialize;

use super::{
    Inconsistency, ItineraryConfig, ItinerarySummary, Transition, classic_segments,
    rank_alternatives, reconstruct, timeline, transitions,
};
use crate::domain::{AlternativePath, ClassicPath, DisplaySegment, SortCriterion, StationTimes};

/// A reconstructed, ready-to-display itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub segments: Vec<DisplaySegment>,
    pub summary: ItinerarySummary,
    pub transitions: Vec<Transition>,
    pub inconsistencies: Vec<Inconsistency>,

    /// Endpoint-only times of every ride, merged in travel order.
    pub timeline: StationTimes,
}

impl Itinerary {
    /// Reconstruct `path` into display segments and derive its figures.
    pub fn from_path(path: &AlternativePath, config: &ItineraryConfig) -> Self {
        if config.normalize_overnight {
            Self::from_prepared(&path.with_overnight_normalized())
        } else {
            Self::from_prepared(path)
        }
    }

    /// Lay out an untimed shortest path. It has no transitions, no
    /// inconsistencies and an empty timeline.
    pub fn from_classic(path: &ClassicPath) -> Self {
        let segments = classic_segments(path);
        Self {
            summary: ItinerarySummary::from_classic(path, &segments),
            transitions: Vec::new(),
            inconsistencies: Vec::new(),
            timeline: StationTimes::new(),
            segments,
        }
    }

    /// Reconstruct a path whose times are already in their final form.
    fn from_prepared(path: &AlternativePath) -> Self {
        let reconstruction = reconstruct(path.temporal_segments(), path.structural());
        let summary = ItinerarySummary::new(path, &reconstruction.segments);
        let transitions = transitions(&reconstruction.segments);

        Self {
            summary,
            transitions,
            timeline: timeline(path.temporal_segments()),
            segments: reconstruction.segments,
            inconsistencies: reconstruction.inconsistencies,
        }
    }
}

/// Lightweight overview of one alternative, for choosing between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativeOverview {
    pub index: usize,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    #[serde(flatten)]
    pub summary: ItinerarySummary,
}

/// Ranked alternatives for one query.
///
/// Paths are stored with their times already normalized as configured, so
/// overviews and selections always show the same clock.
#[derive(Debug, Clone, Default)]
pub struct AlternativeSet {
    paths: Vec<AlternativePath>,
}

impl AlternativeSet {
    /// Rank `paths` by `sort_by` and hold them for selection.
    pub fn new(
        paths: Vec<AlternativePath>,
        sort_by: SortCriterion,
        config: &ItineraryConfig,
    ) -> Self {
        let paths = if config.normalize_overnight {
            paths.iter().map(AlternativePath::with_overnight_normalized).collect()
        } else {
            paths
        };

        Self {
            paths: rank_alternatives(paths, sort_by),
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Ranked paths.
    pub fn paths(&self) -> &[AlternativePath] {
        &self.paths
    }

    /// Reconstruct the alternative at `index`. `None` if out of range.
    pub fn select(&self, index: usize) -> Option<Itinerary> {
        self.paths
            .get(index)
            .map(Itinerary::from_prepared)
    }

    /// An overview of every alternative, in ranked order.
    pub fn summaries(&self) -> Vec<AlternativeOverview> {
        self.paths
            .iter()
            .enumerate()
            .map(|(index, path)| {
                let itinerary = Itinerary::from_prepared(path);
                let segments = &itinerary.segments;
                AlternativeOverview {
                    index,
                    departure_time: path
                        .departure_time
                        .clone()
                        .or_else(|| segments.first().and_then(|s| s.departure_time.clone())),
                    arrival_time: path
                        .arrival_time
                        .clone()
                        .or_else(|| segments.last().and_then(|s| s.arrival_time.clone())),
                    summary: itinerary.summary,
                }
            })
            .collect()
    }
}
