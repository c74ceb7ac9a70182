//! Incremental station-time bookkeeping.
//!
//! When rides are appended one at a time instead of reconstructed in bulk,
//! [`merge`] folds each ride's endpoint times into a running mapping.

use super::compute_station_times;
use crate::domain::{StationTime, StationTimes, TemporalSegment};

/// Fold one ride's times into `existing`, returning the updated mapping.
///
/// An empty mapping starts over from the ride's two endpoints. Otherwise the
/// ride's departure becomes the arrival time of its origin (when the origin
/// is already known) and its destination is set to the ride's arrival.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::{StationTimes, TemporalSegment};
/// use itinerary_server::itinerary::merge_station_times;
///
/// let first = TemporalSegment::new("1", "A", "B").with_times("08:00:00", "08:10:00");
/// let second = TemporalSegment::new("2", "B", "C").with_times("08:15:00", "08:25:00");
///
/// let times = merge_station_times(&StationTimes::new(), &first);
/// let times = merge_station_times(&times, &second);
///
/// assert_eq!(times["B"].arrival.as_deref(), Some("08:15:00"));
/// assert_eq!(times["C"].arrival.as_deref(), Some("08:25:00"));
/// ```
pub fn merge(existing: &StationTimes, ride: &TemporalSegment) -> StationTimes {
    if existing.is_empty() {
        let endpoints = [ride.from_station.clone(), ride.to_station.clone()];
        return compute_station_times(
            &endpoints,
            ride.departure_time.as_deref(),
            ride.arrival_time.as_deref(),
        );
    }

    let mut updated = existing.clone();

    if let Some(origin) = updated.get_mut(&ride.from_station) {
        origin.arrival = ride.departure_time.clone();
    }

    updated.insert(
        ride.to_station.clone(),
        StationTime::arriving(ride.arrival_time.clone()),
    );

    updated
}

/// Coarse timeline of a whole ride sequence: [`merge`] folded left to right.
pub fn timeline(rides: &[TemporalSegment]) -> StationTimes {
    rides
        .iter()
        .fold(StationTimes::new(), |times, ride| merge(&times, ride))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ride(from: &str, to: &str, dep: &str, arr: &str) -> TemporalSegment {
        TemporalSegment::new("1", from, to).with_times(dep, arr)
    }

    #[test]
    fn empty_delegates_to_endpoints() {
        let times = merge(&StationTimes::new(), &ride("A", "B", "08:00:00", "08:10:00"));
        assert_eq!(times.len(), 2);
        assert_eq!(times["A"], StationTime::departing(Some("08:00:00".into())));
        assert_eq!(times["B"], StationTime::arriving(Some("08:10:00".into())));
    }

    #[test]
    fn input_is_not_mutated() {
        let before = merge(&StationTimes::new(), &ride("A", "B", "08:00:00", "08:10:00"));
        let snapshot = before.clone();

        let after = merge(&before, &ride("B", "C", "08:15:00", "08:25:00"));

        assert_eq!(before, snapshot);
        assert_ne!(before, after);
    }

    #[test]
    fn unknown_origin_is_not_created() {
        let before = merge(&StationTimes::new(), &ride("A", "B", "08:00:00", "08:10:00"));
        let after = merge(&before, &ride("X", "C", "08:15:00", "08:25:00"));

        assert!(!after.contains_key("X"));
        assert_eq!(after["C"], StationTime::arriving(Some("08:25:00".into())));
    }

    #[test]
    fn destination_is_overwritten() {
        let mut existing = StationTimes::new();
        existing.insert("B".into(), StationTime::departing(Some("07:00:00".into())));

        let after = merge(&existing, &ride("A", "B", "08:00:00", "08:10:00"));
        assert_eq!(after["B"], StationTime::arriving(Some("08:10:00".into())));
    }

    #[test]
    fn missing_departure_clears_origin_arrival() {
        let before = merge(&StationTimes::new(), &ride("A", "B", "08:00:00", "08:10:00"));
        let next = TemporalSegment::new("2", "B", "C");
        let after = merge(&before, &next);

        assert_eq!(after["B"].arrival, None);
        assert_eq!(after["C"], StationTime::unknown());
    }

    #[test]
    fn timeline_over_three_rides() {
        let rides = vec![
            ride("A", "B", "08:00:00", "08:10:00"),
            ride("B", "C", "08:12:00", "08:20:00"),
            ride("C", "D", "08:25:00", "08:40:00"),
        ];
        let times = timeline(&rides);

        assert_eq!(times.len(), 4);
        assert_eq!(times["A"].departure.as_deref(), Some("08:00:00"));
        assert_eq!(times["B"].departure, None);
        assert_eq!(times["B"].arrival.as_deref(), Some("08:12:00"));
        assert_eq!(times["C"].arrival.as_deref(), Some("08:25:00"));
        assert_eq!(times["D"].arrival.as_deref(), Some("08:40:00"));
    }

    #[test]
    fn timeline_of_nothing() {
        assert!(timeline(&[]).is_empty());
    }
}
