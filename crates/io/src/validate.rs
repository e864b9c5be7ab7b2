//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus standalone checks on the
//! columns of a site table.

use chrono::NaiveDate;

use crate::error::IoError;

/// Most messages kept in a validation summary; further errors are counted.
const MAX_DETAILS: usize = 10;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
///
/// Create a collector, push zero or more error messages, then call
/// [`finish`](Self::finish) to obtain `Ok(())` when everything is valid or a
/// single `Err` that summarises every violation.
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Returns `true` when no errors have been recorded.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins the first messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let count = self.errors.len();
        let mut details = self.errors[..count.min(MAX_DETAILS)].join("; ");
        if count > MAX_DETAILS {
            details.push_str(&format!("; ... and {} more", count - MAX_DETAILS));
        }
        Err(IoError::Validation { count, details })
    }
}

// ---------------------------------------------------------------------------
// Standalone validation helpers
// ---------------------------------------------------------------------------

/// Check that every time offset is a finite whole number of days.
pub(crate) fn validate_offsets(time: &[f64]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (i, &t) in time.iter().enumerate() {
        if !t.is_finite() {
            c.push(format!("missing time offset at row {i}"));
        } else if t.fract() != 0.0 {
            c.push(format!("non-integral time offset at row {i}: {t}"));
        }
    }

    c
}

/// Check that an ascending date slice holds no repeats.
pub(crate) fn validate_unique_dates(sorted: &[NaiveDate]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            c.push(format!("duplicate date {}", pair[1]));
        }
    }

    c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
