//! Cyclic no-leap labels for a contiguous, leap-day-free daily series.

use chrono::NaiveDate;

use crate::date::NoLeapDate;
use crate::error::CalendarError;

/// Labels every date with its `(year, doy)` in the no-leap calendar.
///
/// The input must be ascending, free of February 29th, and contiguous once
/// leap days are ignored. The first partial year then carries DOYs
/// `start_doy..=365`, every interior year `1..=365` and the last partial year
/// `1..=end_doy`.
///
/// # Errors
///
/// Returns [`CalendarError::LeapDay`] if a February 29th is present and
/// [`CalendarError::NotContiguous`] on any gap, repeat or reversal.
pub fn label_series(dates: &[NaiveDate]) -> Result<Vec<NoLeapDate>, CalendarError> {
    let mut labels: Vec<NoLeapDate> = Vec::with_capacity(dates.len());
    for (row, &date) in dates.iter().enumerate() {
        let label = NoLeapDate::from_gregorian(date)?;
        if let Some(&prev) = labels.last()
            && prev.next() != label
        {
            return Err(CalendarError::NotContiguous {
                row,
                previous: dates[row - 1],
                current: date,
            });
        }
        labels.push(label);
    }
    Ok(labels)
}
