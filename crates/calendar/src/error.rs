//! Error types for the spei-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the spei-calendar crate.
///
/// Covers validation failures for day-of-year values and month/day pairs in
/// the 365-day no-leap calendar, plus Gregorian dates that have no no-leap
/// counterpart.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=365.
    #[error("invalid day of year: {doy} (must be 1..=365)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the number of days in the given month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The maximum valid day for the given month.
        max_day: u8,
    },

    /// Returned when February 29th is converted to the no-leap calendar.
    #[error("{date} is a leap day and has no no-leap day of year")]
    LeapDay {
        /// The offending Gregorian date.
        date: NaiveDate,
    },

    /// Returned when consecutive labels do not advance by exactly one day.
    #[error("series is not contiguous at row {row}: {previous} is followed by {current}")]
    NotContiguous {
        /// Row index of the label that breaks the sequence.
        row: usize,
        /// Date of the preceding row.
        previous: NaiveDate,
        /// Date of the offending row.
        current: NaiveDate,
    },

    /// Returned when bounds are requested for an empty series.
    #[error("cannot derive series bounds from an empty date sequence")]
    EmptySeries,
}
