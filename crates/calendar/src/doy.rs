//! Day-of-year newtype for the 365-day no-leap calendar.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Day-of-year in the 365-day no-leap calendar (1..=365).
///
/// February always has 28 days, so March 1 is DOY 60 in every year and
/// December 31 is DOY 365.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

/// Number of days in each month (index 0 unused, index 1 = January, ..., index 12 = December).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day-of-year on which each month starts (index 0 unused, index 1 = January starts at DOY 1, ...).
pub(crate) const MONTH_START_DOY: [u16; 13] =
    [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

impl Doy {
    /// First day of the no-leap year.
    pub const FIRST: Doy = Doy(1);
    /// Last day of the no-leap year.
    pub const LAST: Doy = Doy(365);

    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=365.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=365).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Creates a new `Doy` from a (month, day) pair.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    /// Returns [`CalendarError::InvalidDay`] if `day` is not valid for the given month.
    pub fn from_month_day(month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = DAYS_PER_MONTH[month as usize];
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        Ok(Self(MONTH_START_DOY[month as usize] + day as u16 - 1))
    }

    /// Maps a Gregorian date onto the no-leap calendar.
    ///
    /// Days after February in a leap year are shifted back by one, so the
    /// label depends only on month and day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::LeapDay`] for February 29th.
    pub fn from_date(date: NaiveDate) -> Result<Self, CalendarError> {
        if crate::is_leap_day(date) {
            return Err(CalendarError::LeapDay { date });
        }
        Self::from_month_day(date.month() as u8, date.day() as u8)
    }

    /// Returns the inner day-of-year value (1..=365).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the `(month, day)` pair for this day-of-year.
    pub(crate) fn month_day(self) -> (u8, u8) {
        let month = (1..=12u8)
            .rev()
            .find(|&m| MONTH_START_DOY[m as usize] <= self.0)
            .unwrap_or(1);
        let day = self.0 - MONTH_START_DOY[month as usize] + 1;
        (month, day as u8)
    }

    /// The following day of the same year, or `None` on December 31.
    pub fn succ(self) -> Option<Doy> {
        (self.0 < 365).then_some(Self(self.0 + 1))
    }

    /// Iterates over all 365 days of the no-leap year in order.
    pub fn all() -> impl Iterator<Item = Doy> {
        (1..=365u16).map(Doy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_bounds() {
        assert_eq!(Doy::new(1).unwrap(), Doy::FIRST);
        assert_eq!(Doy::new(365).unwrap(), Doy::LAST);
        assert_eq!(
            Doy::new(0).unwrap_err(),
            CalendarError::InvalidDoy { doy: 0 }
        );
        assert_eq!(
            Doy::new(366).unwrap_err(),
            CalendarError::InvalidDoy { doy: 366 }
        );
    }

    #[test]
    fn from_month_day_valid() {
        assert_eq!(Doy::from_month_day(1, 1).unwrap().get(), 1);
        assert_eq!(Doy::from_month_day(2, 28).unwrap().get(), 59);
        assert_eq!(Doy::from_month_day(3, 1).unwrap().get(), 60);
        assert_eq!(Doy::from_month_day(12, 31).unwrap().get(), 365);
    }

    #[test]
    fn from_month_day_rejects_feb_29() {
        assert_eq!(
            Doy::from_month_day(2, 29).unwrap_err(),
            CalendarError::InvalidDay {
                day: 29,
                month: 2,
                max_day: 28,
            }
        );
    }

    #[test]
    fn from_month_day_invalid_month() {
        assert_eq!(
            Doy::from_month_day(13, 1).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn from_date_leap_year_shift() {
        // 2020-03-01 is Gregorian DOY 61 but no-leap DOY 60.
        assert_eq!(Doy::from_date(ymd(2020, 3, 1)).unwrap().get(), 60);
        assert_eq!(Doy::from_date(ymd(2019, 3, 1)).unwrap().get(), 60);
        assert_eq!(Doy::from_date(ymd(2020, 12, 31)).unwrap().get(), 365);
    }

    #[test]
    fn from_date_rejects_leap_day() {
        let date = ymd(2020, 2, 29);
        assert_eq!(
            Doy::from_date(date).unwrap_err(),
            CalendarError::LeapDay { date }
        );
    }

    #[test]
    fn month_day_roundtrip_all_365() {
        for doy in Doy::all() {
            let (m, d) = doy.month_day();
            assert_eq!(
                Doy::from_month_day(m, d).unwrap(),
                doy,
                "roundtrip failed for doy {}",
                doy.get()
            );
        }
    }

    #[test]
    fn accessors() {
        let doy = Doy::new(59).unwrap();
        assert_eq!(doy.get(), 59);
        assert_eq!(doy.month_day(), (2, 28));
    }

    #[test]
    fn succ_stops_at_year_end() {
        assert_eq!(Doy::FIRST.succ().unwrap().get(), 2);
        assert_eq!(Doy::LAST.succ(), None);
    }

    #[test]
    fn all_yields_365_ordered() {
        let days: Vec<Doy> = Doy::all().collect();
        assert_eq!(days.len(), 365);
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn table_integrity_month_start() {
        for m in 1..12usize {
            assert_eq!(
                MONTH_START_DOY[m] + DAYS_PER_MONTH[m] as u16,
                MONTH_START_DOY[m + 1],
                "MONTH_START_DOY mismatch at month {m}"
            );
        }
        assert_eq!(MONTH_START_DOY[12] + DAYS_PER_MONTH[12] as u16 - 1, 365);
    }
}
