//! Error types for the spei-core crate.

use chrono::NaiveDate;
use spei_calendar::CalendarError;

/// Error type for all fallible operations in the spei-core crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpeiError {
    /// Returned when the input series has no rows.
    #[error("input series is empty")]
    EmptySeries,

    /// Returned when parallel input columns differ in length.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched field.
        field: String,
    },

    /// Returned when dates are not strictly consecutive days.
    #[error("series is not contiguous at row {row}: {previous} is followed by {current}")]
    NotContiguous {
        /// Row index of the offending date.
        row: usize,
        /// Date of the preceding row.
        previous: NaiveDate,
        /// Date of the offending row.
        current: NaiveDate,
    },

    /// Returned when a February 29th has no February 28th to fold into.
    #[error("leap day {date} has no matching February 28th in the series")]
    UnpairedLeapDay {
        /// The leap day that could not be folded.
        date: NaiveDate,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the no-leap calendar labeling fails.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Returned when a stratum produces a different number of values than
    /// it was given. Fatal for the whole series.
    #[error("engine invariant violated at day of year {doy}: expected {expected} values, got {got}")]
    InvariantViolation {
        /// Day of year of the offending stratum.
        doy: u16,
        /// Number of values expected.
        expected: usize,
        /// Number of values produced.
        got: usize,
    },

    /// Returned when the merged strata do not cover every row exactly once.
    #[error("reassembly covered {got} rows, expected {expected}")]
    ReassemblyMismatch {
        /// Number of rows in the series.
        expected: usize,
        /// Number of row writes produced by the strata.
        got: usize,
    },
}

impl From<CalendarError> for SpeiError {
    fn from(e: CalendarError) -> Self {
        SpeiError::Calendar {
            reason: e.to_string(),
        }
    }
}
