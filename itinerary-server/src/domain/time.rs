//! Clock time handling for routing-backend timestamps.
//!
//! The routing backend sends wall-clock times as "HH:MM:SS" strings with no
//! date attached. This module anchors them to a fixed reference date so that
//! differences and interpolated offsets can be computed with chrono.
//!
//! Hours beyond 23 (overnight service written as "24:30:00") are rejected by
//! [`ClockTime::parse`]; callers that want them folded back onto the clock use
//! [`normalize_overnight`] first.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// The date every backend timestamp is parsed against.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default()
}

/// A wall-clock time anchored to [`reference_date`].
///
/// Arithmetic may move the value onto another day; [`fmt::Display`] only
/// ever prints the time of day.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::ClockTime;
///
/// let t = ClockTime::parse("08:25:00").unwrap();
/// assert_eq!(t.to_string(), "08:25:00");
///
/// // Minutes-only input is accepted too
/// assert_eq!(ClockTime::parse("08:25").unwrap(), t);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    at: NaiveDateTime,
}

impl ClockTime {
    /// Anchor a time of day to the reference date.
    pub fn new(time: NaiveTime) -> Self {
        Self {
            at: reference_date().and_time(time),
        }
    }

    /// Parse "HH:MM:SS" or "HH:MM".
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_server::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse("00:00:00").is_ok());
    /// assert!(ClockTime::parse("23:59:59").is_ok());
    ///
    /// assert!(ClockTime::parse("24:30:00").is_err());
    /// assert!(ClockTime::parse("8h25").is_err());
    /// assert!(ClockTime::parse("").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (hour, minute, second) = split_clock(s)?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or_else(|| TimeError::new("invalid time"))?;
        Ok(Self::new(time))
    }

    /// Returns the time of day.
    pub fn time(&self) -> NaiveTime {
        self.at.time()
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.at.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.at.minute()
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u32 {
        self.at.second()
    }

    /// Whole days between the reference date and this value.
    pub fn day_offset(&self) -> i64 {
        self.at
            .date()
            .signed_duration_since(reference_date())
            .num_days()
    }

    /// Add a duration; `None` on overflow.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.at
            .checked_add_signed(duration)
            .map(|at| Self { at })
    }

    /// Returns the duration between two times.
    ///
    /// Returns a negative duration if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.at.signed_duration_since(other.at)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({} {})", self.at.date(), self)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Split "HH:MM[:SS]" into its numeric parts without range-checking the hour.
fn split_clock(s: &str) -> Result<(u32, u32, u32), TimeError> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return Err(TimeError::new("expected HH:MM or HH:MM:SS format"));
    }

    let hour = parse_two_digits(parts[0].as_bytes())
        .ok_or_else(|| TimeError::new("invalid hour digits"))?;
    let minute = parse_two_digits(parts[1].as_bytes())
        .ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    let second = match parts.get(2) {
        Some(sec) => parse_two_digits(sec.as_bytes())
            .ok_or_else(|| TimeError::new("invalid second digits"))?,
        None => 0,
    };
    if second > 59 {
        return Err(TimeError::new("second must be 0-59"));
    }

    Ok((hour, minute, second))
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// Fold an overnight timestamp ("24:30:00", "25:05") back onto the clock.
///
/// Returns `None` when the input is not a time at all. Times already within
/// 00-23 come back re-formatted as "HH:MM:SS".
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::normalize_overnight;
///
/// assert_eq!(normalize_overnight("24:30:00").as_deref(), Some("00:30:00"));
/// assert_eq!(normalize_overnight("25:05").as_deref(), Some("01:05:00"));
/// assert_eq!(normalize_overnight("08:00:00").as_deref(), Some("08:00:00"));
/// assert_eq!(normalize_overnight("soon"), None);
/// ```
pub fn normalize_overnight(s: &str) -> Option<String> {
    let (hour, minute, second) = split_clock(s).ok()?;
    Some(format!("{:02}:{:02}:{:02}", hour % 24, minute, second))
}

/// A user-entered query time ("HH:MM").
///
/// Hours 24-31 are accepted and mean the early hours of the following day,
/// which is how the routing backend expects late-night departures to be
/// written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryTime {
    time: NaiveTime,
    next_day: bool,
}

impl QueryTime {
    /// Parse "H:MM" or "HH:MM" with hours 0-31.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinerary_server::domain::QueryTime;
    ///
    /// let t = QueryTime::parse("8:30").unwrap();
    /// assert_eq!(t.to_string(), "08:30");
    /// assert!(!t.is_next_day());
    ///
    /// let late = QueryTime::parse("24:30").unwrap();
    /// assert!(late.is_next_day());
    /// assert_eq!(late.to_string(), "24:30");
    ///
    /// assert!(QueryTime::parse("32:00").is_err());
    /// assert!(QueryTime::parse("08:60").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (hour_str, minute_str) = s
            .split_once(':')
            .ok_or_else(|| TimeError::new("expected HH:MM format"))?;

        if hour_str.is_empty() || hour_str.len() > 2 || !hour_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(TimeError::new("invalid hour digits"));
        }
        let hour: u32 = hour_str
            .parse()
            .map_err(|_| TimeError::new("invalid hour digits"))?;
        if hour > 31 {
            return Err(TimeError::new("hour must be 0-31"));
        }

        let minute = parse_two_digits(minute_str.as_bytes())
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour % 24, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self {
            time,
            next_day: hour >= 24,
        })
    }

    /// Time of day after folding 24-31 back onto the clock.
    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// True when the query was written with an hour of 24 or more.
    pub fn is_next_day(&self) -> bool {
        self.next_day
    }
}

impl fmt::Display for QueryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.time.hour() + if self.next_day { 24 } else { 0 };
        write!(f, "{:02}:{:02}", hour, self.time.minute())
    }
}

/// Human-readable duration: "45s", "12min", "12min 30s".
///
/// Zero renders as "0 min".
pub fn format_duration_secs(seconds: u32) -> String {
    if seconds == 0 {
        return "0 min".to_string();
    }

    let minutes = seconds / 60;
    let remaining = seconds % 60;

    match (minutes, remaining) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}min"),
        (m, s) => format!("{m}min {s}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        let t = ClockTime::parse("00:00:00").unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (0, 0, 0));

        let t = ClockTime::parse("23:59:59").unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (23, 59, 59));

        let t = ClockTime::parse("14:30").unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (14, 30, 0));
    }

    #[test]
    fn parse_invalid_format() {
        // Wrong shape
        assert!(ClockTime::parse("1430").is_err());
        assert!(ClockTime::parse("14:3").is_err());
        assert!(ClockTime::parse("14:30:0").is_err());
        assert!(ClockTime::parse("14:30:00:00").is_err());

        // Non-digit characters
        assert!(ClockTime::parse("ab:cd").is_err());
        assert!(ClockTime::parse("1a:30:00").is_err());
        assert!(ClockTime::parse("Invalid Date").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(ClockTime::parse("24:00:00").is_err());
        assert!(ClockTime::parse("12:60:00").is_err());
        assert!(ClockTime::parse("12:00:60").is_err());
    }

    #[test]
    fn anchored_to_reference_date() {
        let t = ClockTime::parse("08:00:00").unwrap();
        assert_eq!(t.day_offset(), 0);

        let later = t.checked_add(Duration::hours(20)).unwrap();
        assert_eq!(later.to_string(), "04:00:00");
        assert_eq!(later.day_offset(), 1);
    }

    #[test]
    fn duration_between() {
        let t1 = ClockTime::parse("08:00:00").unwrap();
        let t2 = ClockTime::parse("08:10:30").unwrap();

        assert_eq!(t2.signed_duration_since(t1), Duration::seconds(630));
        assert_eq!(t1.signed_duration_since(t2), Duration::seconds(-630));
    }

    #[test]
    fn display_pads_fields() {
        let t = ClockTime::parse("09:05").unwrap();
        assert_eq!(t.to_string(), "09:05:00");
    }

    #[test]
    fn normalize_overnight_folds_hours() {
        assert_eq!(normalize_overnight("24:00:00").as_deref(), Some("00:00:00"));
        assert_eq!(normalize_overnight("31:59").as_deref(), Some("07:59:00"));
        assert_eq!(normalize_overnight("12:61:00"), None);
    }

    #[test]
    fn query_time_bounds() {
        assert!(QueryTime::parse("0:00").is_ok());
        assert!(QueryTime::parse("31:59").is_ok());

        assert!(QueryTime::parse("").is_err());
        assert!(QueryTime::parse("08h30").is_err());
        assert!(QueryTime::parse("123:00").is_err());
        assert!(QueryTime::parse("08:5").is_err());
        assert!(QueryTime::parse("08:30:00").is_err());
    }

    #[test]
    fn query_time_next_day() {
        let t = QueryTime::parse("25:15").unwrap();
        assert!(t.is_next_day());
        assert_eq!(t.time(), NaiveTime::from_hms_opt(1, 15, 0).unwrap());
    }

    #[test]
    fn format_duration() {
        assert_eq!(format_duration_secs(0), "0 min");
        assert_eq!(format_duration_secs(45), "45s");
        assert_eq!(format_duration_secs(720), "12min");
        assert_eq!(format_duration_secs(750), "12min 30s");
    }
}
