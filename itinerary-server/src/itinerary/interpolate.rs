//! Per-station timestamps by linear interpolation.

use chrono::Duration;

use crate::domain::{ClockTime, StationTime, StationTimes};

/// Derive a timestamp for every station of a ride.
///
/// The first station departs at `departure`, the last arrives at `arrival`,
/// and intermediate stations get evenly spaced arrival times in between.
/// Intermediate stations are left unknown when either endpoint is missing or
/// unparseable; endpoints always keep whatever was given.
///
/// `stations` must be duplicate-free; a repeated name keeps its last entry.
///
/// # Examples
///
/// ```
/// use itinerary_server::itinerary::compute_station_times;
///
/// let stations = ["A", "B", "C"].map(String::from);
/// let times = compute_station_times(&stations, Some("08:00:00"), Some("08:10:00"));
///
/// assert_eq!(times["A"].departure.as_deref(), Some("08:00:00"));
/// assert_eq!(times["B"].arrival.as_deref(), Some("08:05:00"));
/// assert_eq!(times["C"].arrival.as_deref(), Some("08:10:00"));
/// ```
pub fn compute_station_times(
    stations: &[String],
    departure: Option<&str>,
    arrival: Option<&str>,
) -> StationTimes {
    let mut times = StationTimes::new();

    let Some((first, rest)) = stations.split_first() else {
        return times;
    };
    times.insert(
        first.clone(),
        StationTime::departing(departure.map(str::to_string)),
    );

    let Some((last, intermediates)) = rest.split_last() else {
        return times;
    };

    let bounds = departure
        .and_then(|d| ClockTime::parse(d).ok())
        .zip(arrival.and_then(|a| ClockTime::parse(a).ok()));

    match bounds {
        Some((start, end)) => {
            let total_ms = end.signed_duration_since(start).num_milliseconds();
            let steps = (stations.len() - 1) as i64;
            for (offset, station) in intermediates.iter().enumerate() {
                let i = offset as i64 + 1;
                let at = start
                    .checked_add(Duration::milliseconds(total_ms * i / steps))
                    .map(|t| t.to_string());
                times.insert(station.clone(), StationTime::arriving(at));
            }
        }
        None => {
            for station in intermediates {
                times.insert(station.clone(), StationTime::unknown());
            }
        }
    }

    times.insert(
        last.clone(),
        StationTime::arriving(arrival.map(str::to_string)),
    );

    times
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn fmt_secs(secs: u32) -> String {
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }

    proptest! {
        /// Interpolated times never go backwards when departure <= arrival
        #[test]
        fn monotonic_when_ordered(
            dep in 0u32..80_000,
            span in 0u32..6_000,
            n in 2usize..30,
        ) {
            let arr = (dep + span).min(86_399);
            let stations: Vec<String> = (0..n).map(|i| format!("S{i}")).collect();
            let departure = fmt_secs(dep);
            let arrival = fmt_secs(arr);

            let times = compute_station_times(&stations, Some(&departure), Some(&arrival));
            prop_assert_eq!(times.len(), n);

            let mut ordered = vec![ClockTime::parse(&departure).unwrap()];
            for station in &stations[1..] {
                let t = times[station].arrival.as_deref().unwrap();
                ordered.push(ClockTime::parse(t).unwrap());
            }
            prop_assert!(ordered.windows(2).all(|w| w[0] <= w[1]));
        }

        /// Every station gets exactly one entry
        #[test]
        fn one_entry_per_station(n in 0usize..20) {
            let stations: Vec<String> = (0..n).map(|i| format!("S{i}")).collect();
            let times = compute_station_times(&stations, None, Some("08:00:00"));
            prop_assert_eq!(times.len(), n);
        }
    }
}
