//! Interchange detection and transfer metrics.
//!
//! Every query here reads the [`Transition`]s between reconstructed display
//! segments. The stop time between ride `i` and ride `i + 1` belongs to the
//! ride being entered; [`transfer_metrics`] for ride `i` therefore reports
//! the transfer recorded on ride `i + 1`.

use serde::Serialize;

use super::reconstruct;
use crate::domain::{DisplaySegment, StructuralSegment, TemporalSegment};

/// Stop time at which the progress indicator is full, in seconds.
pub const PROGRESS_CEILING_SECS: u32 = 600;

/// Stops shorter than this are fast, in seconds.
pub const FAST_STOP_SECS: u32 = 120;

/// Stops shorter than this (and not fast) are normal, in seconds.
pub const NORMAL_STOP_SECS: u32 = 300;

/// A line change between two consecutive rides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Index of the ride being left; the ride entered is the next one.
    pub after_segment_index: usize,
    pub transfer_time: u32,
    pub wait_time: u32,
    pub station: Option<String>,
    pub from_line: Option<String>,
    pub to_line: Option<String>,
}

impl Transition {
    /// Walk plus wait, seconds.
    pub fn stop_time(&self) -> u32 {
        self.transfer_time.saturating_add(self.wait_time)
    }
}

/// How long a stop feels, judged from its duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    Fast,
    Normal,
    Long,
}

impl ProgressBand {
    pub fn from_seconds(seconds: u32) -> Self {
        if seconds < FAST_STOP_SECS {
            ProgressBand::Fast
        } else if seconds < NORMAL_STOP_SECS {
            ProgressBand::Normal
        } else {
            ProgressBand::Long
        }
    }
}

/// Colour tone of the progress indicator, judged from the fill percentage.
///
/// Older clients colour the indicator from the percentage rather than from
/// the band; both are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTone {
    Short,
    Medium,
    Long,
}

impl ProgressTone {
    pub fn from_percent(percent: f64) -> Self {
        if percent < 30.0 {
            ProgressTone::Short
        } else if percent < 60.0 {
            ProgressTone::Medium
        } else {
            ProgressTone::Long
        }
    }

    /// CSS colour of the tone.
    pub fn color(&self) -> &'static str {
        match self {
            ProgressTone::Short => "#4CAF50",
            ProgressTone::Medium => "#FF9800",
            ProgressTone::Long => "#F44336",
        }
    }
}

/// Stop-time figures for the change following one ride.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferMetrics {
    /// Walk time, `None` when zero or when there is no change.
    pub transfer_time: Option<u32>,

    /// Platform wait, `None` when zero or when there is no change.
    pub wait_time: Option<u32>,

    /// Walk plus wait, `None` when both are zero.
    pub total_stop_time: Option<u32>,

    /// Stop time as a share of [`PROGRESS_CEILING_SECS`], capped at 100 and
    /// rounded to two decimals.
    pub progress_percent: f64,

    /// `None` when there is no stop time.
    pub progress_band: Option<ProgressBand>,
}

impl TransferMetrics {
    fn none() -> Self {
        Self {
            transfer_time: None,
            wait_time: None,
            total_stop_time: None,
            progress_percent: 0.0,
            progress_band: None,
        }
    }

    fn from_transition(transition: &Transition) -> Self {
        let nonzero = |secs: u32| (secs > 0).then_some(secs);
        let total_stop_time = nonzero(transition.stop_time());

        let progress_percent = total_stop_time.map_or(0.0, |total| {
            let raw = (f64::from(total) / f64::from(PROGRESS_CEILING_SECS) * 100.0).min(100.0);
            (raw * 100.0).round() / 100.0
        });

        Self {
            transfer_time: nonzero(transition.transfer_time),
            wait_time: nonzero(transition.wait_time),
            total_stop_time,
            progress_percent,
            progress_band: total_stop_time.map(ProgressBand::from_seconds),
        }
    }

    /// Colour tone from the fill percentage.
    pub fn tone(&self) -> ProgressTone {
        ProgressTone::from_percent(self.progress_percent)
    }
}

/// The change entering ride `index`, if that ride carries transfer info and
/// follows another ride.
fn transition_into(segments: &[DisplaySegment], index: usize) -> Option<Transition> {
    let after_segment_index = index.checked_sub(1)?;
    let info = segments.get(index)?.transfer_info.as_ref()?;

    Some(Transition {
        after_segment_index,
        transfer_time: info.transfer_time,
        wait_time: info.wait_time,
        station: info.transfer_station.clone(),
        from_line: info.from_line.clone(),
        to_line: info.to_line.clone(),
    })
}

/// Every line change of an itinerary, in travel order.
pub fn transitions(segments: &[DisplaySegment]) -> Vec<Transition> {
    (1..segments.len())
        .filter_map(|i| transition_into(segments, i))
        .collect()
}

/// Number of rides entered by changing line, a leading transfer included.
pub fn transfer_count(segments: &[DisplaySegment]) -> usize {
    segments.iter().filter(|s| s.has_transfer()).count()
}

/// True if the station at `station_index` of ride `segment_index` is where a
/// line change happens.
///
/// That is the case for the last station of a ride followed by a change
/// located there, and for the first station of a ride entered by a change
/// located there. Out-of-range indices are never interchanges.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::TemporalSegment;
/// use itinerary_server::itinerary::{is_interchange, reconstruct};
///
/// let temporal = vec![
///     TemporalSegment::new("1", "A", "B"),
///     TemporalSegment::new("2", "B", "C").with_transfer(120, 60),
/// ];
/// let segments = reconstruct(&temporal, None).segments;
///
/// assert!(is_interchange(&segments, 0, 1));
/// assert!(is_interchange(&segments, 1, 0));
/// assert!(!is_interchange(&segments, 0, 0));
/// assert!(!is_interchange(&segments, 5, 0));
/// ```
pub fn is_interchange(segments: &[DisplaySegment], segment_index: usize, station_index: usize) -> bool {
    let Some(segment) = segments.get(segment_index) else {
        return false;
    };
    let Some(station) = segment.stations.get(station_index) else {
        return false;
    };

    let located_here = |info_holder: &DisplaySegment| {
        info_holder
            .transfer_info
            .as_ref()
            .and_then(|info| info.transfer_station.as_deref())
            == Some(station.as_str())
    };

    let leaving_here = station_index + 1 == segment.stations.len()
        && segments.get(segment_index + 1).is_some_and(located_here);
    let entering_here = station_index == 0 && located_here(segment);

    leaving_here || entering_here
}

/// Stop-time figures for the change after ride `segment_index`.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::TemporalSegment;
/// use itinerary_server::itinerary::{ProgressBand, reconstruct, transfer_metrics};
///
/// let temporal = vec![
///     TemporalSegment::new("1", "A", "B"),
///     TemporalSegment::new("2", "B", "C").with_transfer(300, 100),
/// ];
/// let segments = reconstruct(&temporal, None).segments;
///
/// let metrics = transfer_metrics(&segments, 0);
/// assert_eq!(metrics.total_stop_time, Some(400));
/// assert_eq!(metrics.progress_percent, 66.67);
/// assert_eq!(metrics.progress_band, Some(ProgressBand::Long));
///
/// // Nothing follows the last ride
/// assert_eq!(transfer_metrics(&segments, 1).total_stop_time, None);
/// ```
pub fn transfer_metrics(segments: &[DisplaySegment], segment_index: usize) -> TransferMetrics {
    segment_index
        .checked_add(1)
        .and_then(|next| transition_into(segments, next))
        .map_or_else(TransferMetrics::none, |t| TransferMetrics::from_transition(&t))
}

/// [`transfer_metrics`] for callers holding raw rides rather than display
/// segments.
pub fn metrics_for_temporal(
    temporal: &[TemporalSegment],
    structural: Option<&[StructuralSegment]>,
    segment_index: usize,
) -> TransferMetrics {
    let reconstruction = reconstruct(temporal, structural);
    transfer_metrics(&reconstruction.segments, segment_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StructuralSegment, TransferInfo};

    fn two_rides(transfer_time: u32, wait_time: u32) -> Vec<DisplaySegment> {
        let temporal = vec![
            TemporalSegment::new("1", "A", "B").with_times("08:00:00", "08:10:00"),
            TemporalSegment::new("2", "B", "C")
                .with_times("08:15:00", "08:25:00")
                .with_transfer(transfer_time, wait_time),
        ];
        let structural = vec![
            StructuralSegment::new("1", "A", "B"),
            StructuralSegment::new("2", "B", "C"),
        ];
        reconstruct(&temporal, Some(&structural)).segments
    }

    #[test]
    fn interchange_at_transfer_station() {
        let segments = two_rides(120, 60);

        // Last of ride 0, first of ride 1
        assert!(is_interchange(&segments, 0, 1));
        assert!(is_interchange(&segments, 1, 0));

        // Origin and destination are not interchanges
        assert!(!is_interchange(&segments, 0, 0));
        assert!(!is_interchange(&segments, 1, 1));
    }

    #[test]
    fn interchange_out_of_range() {
        let segments = two_rides(120, 60);
        assert!(!is_interchange(&segments, 2, 0));
        assert!(!is_interchange(&segments, 0, 9));
        assert!(!is_interchange(&[], 0, 0));
    }

    #[test]
    fn no_interchange_without_transfer() {
        let segments = two_rides(0, 60);
        assert!(!is_interchange(&segments, 0, 1));
        assert!(!is_interchange(&segments, 1, 0));
    }

    #[test]
    fn interchange_requires_matching_station() {
        let mut segments = two_rides(120, 60);
        if let Some(info) = segments[1].transfer_info.as_mut() {
            info.transfer_station = Some("Elsewhere".into());
        }
        assert!(!is_interchange(&segments, 0, 1));
        assert!(!is_interchange(&segments, 1, 0));
    }

    #[test]
    fn leading_transfer_without_station_is_not_interchange() {
        let temporal = vec![TemporalSegment::new("1", "A", "B").with_transfer(60, 0)];
        let segments = reconstruct(&temporal, None).segments;
        assert!(!is_interchange(&segments, 0, 0));
        assert_eq!(transfer_count(&segments), 1);
        assert!(transitions(&segments).is_empty());
    }

    #[test]
    fn metrics_bands() {
        // 90s fast, 200s normal, 400s long
        let fast = transfer_metrics(&two_rides(60, 30), 0);
        assert_eq!(fast.total_stop_time, Some(90));
        assert_eq!(fast.progress_band, Some(ProgressBand::Fast));
        assert_eq!(fast.progress_percent, 15.0);

        let normal = transfer_metrics(&two_rides(150, 50), 0);
        assert_eq!(normal.total_stop_time, Some(200));
        assert_eq!(normal.progress_band, Some(ProgressBand::Normal));

        let long = transfer_metrics(&two_rides(300, 100), 0);
        assert_eq!(long.total_stop_time, Some(400));
        assert_eq!(long.progress_band, Some(ProgressBand::Long));
        assert_eq!(long.progress_percent, 66.67);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(ProgressBand::from_seconds(119), ProgressBand::Fast);
        assert_eq!(ProgressBand::from_seconds(120), ProgressBand::Normal);
        assert_eq!(ProgressBand::from_seconds(299), ProgressBand::Normal);
        assert_eq!(ProgressBand::from_seconds(300), ProgressBand::Long);
    }

    #[test]
    fn percent_is_capped() {
        let metrics = transfer_metrics(&two_rides(900, 300), 0);
        assert_eq!(metrics.total_stop_time, Some(1200));
        assert_eq!(metrics.progress_percent, 100.0);
    }

    #[test]
    fn metrics_read_wait_from_entered_ride() {
        let metrics = transfer_metrics(&two_rides(120, 60), 0);
        assert_eq!(metrics.transfer_time, Some(120));
        assert_eq!(metrics.wait_time, Some(60));
        assert_eq!(metrics.total_stop_time, Some(180));
    }

    #[test]
    fn metrics_without_transfer() {
        let segments = two_rides(0, 0);
        let metrics = transfer_metrics(&segments, 0);
        assert_eq!(metrics, TransferMetrics::none());

        // Past the end
        assert_eq!(transfer_metrics(&segments, 7), TransferMetrics::none());
        assert_eq!(transfer_metrics(&segments, usize::MAX), TransferMetrics::none());
    }

    #[test]
    fn zero_wait_reported_as_none() {
        let metrics = transfer_metrics(&two_rides(120, 0), 0);
        assert_eq!(metrics.transfer_time, Some(120));
        assert_eq!(metrics.wait_time, None);
        assert_eq!(metrics.total_stop_time, Some(120));
    }

    #[test]
    fn tones() {
        assert_eq!(ProgressTone::from_percent(0.0), ProgressTone::Short);
        assert_eq!(ProgressTone::from_percent(29.99), ProgressTone::Short);
        assert_eq!(ProgressTone::from_percent(30.0), ProgressTone::Medium);
        assert_eq!(ProgressTone::from_percent(60.0), ProgressTone::Long);
        assert_eq!(ProgressTone::Medium.color(), "#FF9800");

        let metrics = transfer_metrics(&two_rides(300, 100), 0);
        assert_eq!(metrics.tone(), ProgressTone::Long);
    }

    #[test]
    fn transitions_list_changes_in_order() {
        let temporal = vec![
            TemporalSegment::new("1", "A", "B"),
            TemporalSegment::new("2", "B", "C").with_transfer(120, 60),
            TemporalSegment::new("2bis", "C", "D"),
            TemporalSegment::new("3", "D", "E").with_transfer(60, 0),
        ];
        let segments = reconstruct(&temporal, None).segments;
        let found = transitions(&segments);

        assert_eq!(found.len(), 2);
        assert_eq!(
            found[0],
            Transition {
                after_segment_index: 0,
                transfer_time: 120,
                wait_time: 60,
                station: Some("B".into()),
                from_line: Some("1".into()),
                to_line: Some("2".into()),
            }
        );
        assert_eq!(found[1].after_segment_index, 2);
        assert_eq!(found[1].station.as_deref(), Some("D"));
        assert_eq!(found[1].stop_time(), 60);
        assert_eq!(transfer_count(&segments), 2);
    }

    #[test]
    fn temporal_adapter_matches_display_metrics() {
        let temporal = vec![
            TemporalSegment::new("1", "A", "B"),
            TemporalSegment::new("2", "B", "C").with_transfer(150, 50),
        ];
        let metrics = metrics_for_temporal(&temporal, None, 0);
        assert_eq!(metrics.total_stop_time, Some(200));
        assert_eq!(metrics.progress_band, Some(ProgressBand::Normal));
        assert_eq!(metrics.progress_percent, 33.33);
    }

    #[test]
    fn transfer_info_with_saturating_totals() {
        let mut segments = two_rides(120, 60);
        segments[1].transfer_info = Some(TransferInfo {
            transfer_time: u32::MAX,
            wait_time: u32::MAX,
            transfer_station: Some("B".into()),
            from_line: None,
            to_line: None,
        });
        let metrics = transfer_metrics(&segments, 0);
        assert_eq!(metrics.total_stop_time, Some(u32::MAX));
        assert_eq!(metrics.progress_percent, 100.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Percent stays within 0-100 and the band follows the seconds
        #[test]
        fn metrics_bounded(transfer in 1u32..5_000, wait in 0u32..5_000) {
            let temporal = vec![
                TemporalSegment::new("1", "A", "B"),
                TemporalSegment::new("2", "B", "C").with_transfer(transfer, wait),
            ];
            let metrics = metrics_for_temporal(&temporal, None, 0);
            let total = transfer + wait;

            prop_assert_eq!(metrics.total_stop_time, Some(total));
            prop_assert!((0.0..=100.0).contains(&metrics.progress_percent));
            prop_assert_eq!(metrics.progress_band, Some(ProgressBand::from_seconds(total)));
        }

        /// One transition per ride entered with a transfer, after the first
        #[test]
        fn transitions_match_transfers(transfers in prop::collection::vec(0u32..300, 1..8)) {
            let temporal: Vec<TemporalSegment> = transfers
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    TemporalSegment::new(format!("L{i}"), format!("S{i}"), format!("S{}", i + 1))
                        .with_transfer(*t, 0)
                })
                .collect();
            let segments = reconstruct(&temporal, None).segments;

            let expected = transfers.iter().skip(1).filter(|t| **t > 0).count();
            prop_assert_eq!(transitions(&segments).len(), expected);
        }
    }
}
