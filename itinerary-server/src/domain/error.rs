//! Domain error types.
//!
//! These errors represent validation failures of user-supplied query data.
//! The reconstruction core never returns them: degraded route payloads are
//! handled by fallbacks, not errors.

use super::TimeError;

/// Query validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A required station name is empty
    #[error("missing {0} station")]
    MissingStation(&'static str),

    /// Time is not "HH:MM" with hours 0-31
    #[error(
        "invalid time format, use HH:MM (e.g. 08:30, or 24:30 for 00:30 the next day): {0}"
    )]
    InvalidTime(#[from] TimeError),

    /// Date is not "YYYY-MM-DD"
    #[error("invalid date, use YYYY-MM-DD: {0}")]
    InvalidDate(String),

    /// Path count outside the accepted range
    #[error("max_paths must be between 1 and {max}, got {got}")]
    InvalidMaxPaths { got: usize, max: usize },
}
