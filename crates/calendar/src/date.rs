//! No-leap date with year context.

use chrono::{Datelike, NaiveDate};

use crate::doy::Doy;
use crate::error::CalendarError;

/// A `(year, day-of-year)` label in the 365-day no-leap calendar.
///
/// Ordering is chronological: by year, then by day-of-year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoLeapDate {
    year: i32,
    doy: Doy,
}

impl NoLeapDate {
    /// Creates a new `NoLeapDate` from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the month or day is invalid for the
    /// 365-day no-leap calendar.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let doy = Doy::from_month_day(month, day)?;
        Ok(Self { year, doy })
    }

    /// Creates a `NoLeapDate` from a year and an already-validated [`Doy`].
    pub fn from_year_doy(year: i32, doy: Doy) -> Self {
        Self { year, doy }
    }

    /// Labels a Gregorian date.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::LeapDay`] for February 29th.
    pub fn from_gregorian(date: NaiveDate) -> Result<Self, CalendarError> {
        Ok(Self {
            year: date.year(),
            doy: Doy::from_date(date)?,
        })
    }

    /// Converts back to the Gregorian date with the same month and day.
    pub fn to_gregorian(self) -> Option<NaiveDate> {
        let (month, day) = self.doy.month_day();
        NaiveDate::from_ymd_opt(self.year, u32::from(month), u32::from(day))
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the day-of-year.
    pub fn doy(self) -> Doy {
        self.doy
    }

    /// Returns the next date in the no-leap calendar.
    ///
    /// December 31 wraps to January 1 of the following year.
    pub fn next(self) -> Self {
        match self.doy.succ() {
            Some(doy) => Self::from_year_doy(self.year, doy),
            None => Self::from_year_doy(self.year + 1, Doy::FIRST),
        }
    }

    /// Number of no-leap days from `origin` to `self` (negative if `self` is
    /// earlier).
    pub fn days_since(self, origin: NoLeapDate) -> i64 {
        (i64::from(self.year) - i64::from(origin.year)) * 365 + i64::from(self.doy.get())
            - i64::from(origin.doy.get())
    }
}
