//! Leap-day detection.

use chrono::{Datelike, NaiveDate};

/// Returns `true` if `date` is February 29th.
pub fn is_leap_day(date: NaiveDate) -> bool {
    date.month() == 2 && date.day() == 29
}

/// February 28th of the given year.
pub fn feb_28(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 2, 28)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_only_feb_29() {
        assert!(is_leap_day(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()));
        assert!(!is_leap_day(NaiveDate::from_ymd_opt(2020, 2, 28).unwrap()));
        assert!(!is_leap_day(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()));
        assert!(!is_leap_day(NaiveDate::from_ymd_opt(2019, 1, 29).unwrap()));
    }

    #[test]
    fn feb_28_exists_every_year() {
        for year in [1900, 2000, 2019, 2020] {
            assert_eq!(feb_28(year).unwrap().day(), 28);
        }
    }
}
