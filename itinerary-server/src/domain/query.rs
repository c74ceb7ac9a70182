//! Validated itinerary queries.
//!
//! An [`ItineraryQuery`] is what gets forwarded to the routing backend.
//! Construction validates the user input so that the backend only ever sees
//! well-formed requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{QueryError, QueryTime};

/// Number of alternatives requested when the caller does not say.
pub const DEFAULT_MAX_PATHS: usize = 4;

/// Upper bound on requested alternatives.
pub const MAX_PATHS_LIMIT: usize = 10;

/// Longest acceptable platform wait by default, seconds.
pub const DEFAULT_MAX_WAIT_TIME: u32 = 1800;

/// Whether the query time is a departure or an arrival deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeType {
    #[default]
    Departure,
    Arrival,
}

/// How alternatives are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    #[default]
    Duration,
    Emissions,
}

impl SortCriterion {
    /// Wire name understood by the routing backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriterion::Duration => "duration",
            SortCriterion::Emissions => "emissions",
        }
    }
}

/// A validated request for alternative itineraries.
///
/// # Invariants
///
/// - Station names are non-empty after trimming
/// - `1 <= max_paths <= MAX_PATHS_LIMIT`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItineraryQuery {
    start_station: String,
    end_station: String,
    time: QueryTime,
    date: Option<NaiveDate>,
    time_type: TimeType,
    sort_by: SortCriterion,
    max_paths: usize,
    max_wait_time: u32,
}

impl ItineraryQuery {
    /// Create a departure query with default limits.
    ///
    /// # Errors
    ///
    /// Returns `Err` if either station is blank or the time is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_server::domain::{ItineraryQuery, TimeType};
    ///
    /// let query = ItineraryQuery::new("Châtelet", "Nation", "08:30").unwrap();
    /// assert_eq!(query.time().to_string(), "08:30");
    /// assert_eq!(query.time_type(), TimeType::Departure);
    ///
    /// assert!(ItineraryQuery::new("", "Nation", "08:30").is_err());
    /// assert!(ItineraryQuery::new("Châtelet", "Nation", "8h30").is_err());
    /// ```
    pub fn new(start_station: &str, end_station: &str, time: &str) -> Result<Self, QueryError> {
        let start_station = start_station.trim();
        let end_station = end_station.trim();
        if start_station.is_empty() {
            return Err(QueryError::MissingStation("start"));
        }
        if end_station.is_empty() {
            return Err(QueryError::MissingStation("end"));
        }

        Ok(Self {
            start_station: start_station.to_string(),
            end_station: end_station.to_string(),
            time: QueryTime::parse(time.trim())?,
            date: None,
            time_type: TimeType::default(),
            sort_by: SortCriterion::default(),
            max_paths: DEFAULT_MAX_PATHS,
            max_wait_time: DEFAULT_MAX_WAIT_TIME,
        })
    }

    /// Set the service date from "YYYY-MM-DD".
    pub fn with_date(mut self, date: &str) -> Result<Self, QueryError> {
        let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| QueryError::InvalidDate(date.to_string()))?;
        self.date = Some(parsed);
        Ok(self)
    }

    /// Treat the time as a departure or an arrival deadline.
    pub fn with_time_type(mut self, time_type: TimeType) -> Self {
        self.time_type = time_type;
        self
    }

    /// Set the ordering of alternatives.
    pub fn with_sort_by(mut self, sort_by: SortCriterion) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Set how many alternatives to request.
    pub fn with_max_paths(mut self, max_paths: usize) -> Result<Self, QueryError> {
        if max_paths == 0 || max_paths > MAX_PATHS_LIMIT {
            return Err(QueryError::InvalidMaxPaths {
                got: max_paths,
                max: MAX_PATHS_LIMIT,
            });
        }
        self.max_paths = max_paths;
        Ok(self)
    }

    /// Set the longest acceptable platform wait, seconds.
    pub fn with_max_wait_time(mut self, max_wait_time: u32) -> Self {
        self.max_wait_time = max_wait_time;
        self
    }

    pub fn start_station(&self) -> &str {
        &self.start_station
    }

    pub fn end_station(&self) -> &str {
        &self.end_station
    }

    pub fn time(&self) -> QueryTime {
        self.time
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time_type(&self) -> TimeType {
        self.time_type
    }

    pub fn sort_by(&self) -> SortCriterion {
        self.sort_by
    }

    pub fn max_paths(&self) -> usize {
        self.max_paths
    }

    pub fn max_wait_time(&self) -> u32 {
        self.max_wait_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let q = ItineraryQuery::new(" A ", "B", "08:30").unwrap();
        assert_eq!(q.start_station(), "A");
        assert_eq!(q.end_station(), "B");
        assert_eq!(q.date(), None);
        assert_eq!(q.time_type(), TimeType::Departure);
        assert_eq!(q.sort_by(), SortCriterion::Duration);
        assert_eq!(q.max_paths(), DEFAULT_MAX_PATHS);
        assert_eq!(q.max_wait_time(), DEFAULT_MAX_WAIT_TIME);
    }

    #[test]
    fn blank_stations_rejected() {
        assert_eq!(
            ItineraryQuery::new("  ", "B", "08:30"),
            Err(QueryError::MissingStation("start"))
        );
        assert_eq!(
            ItineraryQuery::new("A", "", "08:30"),
            Err(QueryError::MissingStation("end"))
        );
    }

    #[test]
    fn date_parsing() {
        let q = ItineraryQuery::new("A", "B", "08:30")
            .unwrap()
            .with_date("2024-03-15")
            .unwrap();
        assert_eq!(q.date(), NaiveDate::from_ymd_opt(2024, 3, 15));

        let err = ItineraryQuery::new("A", "B", "08:30")
            .unwrap()
            .with_date("15/03/2024")
            .unwrap_err();
        assert_eq!(err, QueryError::InvalidDate("15/03/2024".into()));
    }

    #[test]
    fn max_paths_bounds() {
        let q = ItineraryQuery::new("A", "B", "08:30").unwrap();
        assert!(q.clone().with_max_paths(0).is_err());
        assert!(q.clone().with_max_paths(MAX_PATHS_LIMIT + 1).is_err());
        assert_eq!(q.with_max_paths(2).unwrap().max_paths(), 2);
    }

    #[test]
    fn criteria_serde_names() {
        assert_eq!(
            serde_json::to_string(&SortCriterion::Emissions).unwrap(),
            "\"emissions\""
        );
        assert_eq!(
            serde_json::from_str::<TimeType>("\"arrival\"").unwrap(),
            TimeType::Arrival
        );
        assert_eq!(SortCriterion::Duration.as_str(), "duration");
    }

    #[test]
    fn equal_queries_hash_equal() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ItineraryQuery::new("A", "B", "08:30").unwrap());
        assert!(set.contains(&ItineraryQuery::new("A", "B", "8:30").unwrap()));
        assert!(!set.contains(&ItineraryQuery::new("A", "B", "08:31").unwrap()));
    }
}
