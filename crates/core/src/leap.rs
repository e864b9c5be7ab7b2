//! Folding of February 29th into February 28th.

use chrono::{Datelike, NaiveDate};
use spei_calendar::{feb_28, is_leap_day};

use crate::error::SpeiError;

/// A balance series with every leap day folded away.
#[derive(Debug, Clone)]
pub struct LeapFolded {
    /// Source row of each kept value.
    rows: Vec<usize>,
    /// Balance per kept row; Feb 28 of a leap year holds the folded mean.
    balance: Vec<f64>,
    n_folded: usize,
}

impl LeapFolded {
    /// Source-series row index of each kept row.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn balance(&self) -> &[f64] {
        &self.balance
    }

    /// Number of leap days folded.
    pub fn n_folded(&self) -> usize {
        self.n_folded
    }
}

/// Replaces each Feb 28 balance that has a following Feb 29 by the mean of
/// the two, then drops every Feb 29.
///
/// `dates` must be ascending. The Feb 28 partner is located by date. Only
/// finite values are averaged: when one day of the pair is missing the
/// other is kept, and the result is NaN only when both are.
///
/// # Errors
///
/// Returns [`SpeiError::UnpairedLeapDay`] when Feb 28 of a leap day's year
/// is absent from `dates`.
pub fn fold_leap_days(dates: &[NaiveDate], balance: &[f64]) -> Result<LeapFolded, SpeiError> {
    if balance.len() != dates.len() {
        return Err(SpeiError::LengthMismatch {
            expected: dates.len(),
            got: balance.len(),
            field: "balance".to_string(),
        });
    }

    let mut folded = balance.to_vec();
    let mut n_folded = 0;
    for (row, &date) in dates.iter().enumerate() {
        if !is_leap_day(date) {
            continue;
        }
        let partner = feb_28(date.year())
            .and_then(|d| dates.binary_search(&d).ok())
            .ok_or(SpeiError::UnpairedLeapDay { date })?;
        folded[partner] = fold_pair(balance[partner], balance[row]);
        n_folded += 1;
    }

    let rows: Vec<usize> = (0..dates.len())
        .filter(|&i| !is_leap_day(dates[i]))
        .collect();
    let balance = rows.iter().map(|&i| folded[i]).collect();
    Ok(LeapFolded {
        rows,
        balance,
        n_folded,
    })
}

fn fold_pair(feb_28: f64, feb_29: f64) -> f64 {
    match (feb_28.is_finite(), feb_29.is_finite()) {
        (true, true) => (feb_28 + feb_29) / 2.0,
        (true, false) => feb_28,
        (false, true) => feb_29,
        (false, false) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        start.iter_days().take_while(|x| *x <= end).collect()
    }

    #[test]
    fn folds_feb_29_into_feb_28() {
        let dates = days(d(2020, 2, 27), d(2020, 3, 1));
        let bal = [1.0, 2.0, 6.0, 4.0];
        let f = fold_leap_days(&dates, &bal).unwrap();
        assert_eq!(f.balance(), &[1.0, 4.0, 4.0]);
        assert_eq!(f.rows(), &[0, 1, 3]);
        assert_eq!(f.n_folded(), 1);
    }

    #[test]
    fn non_leap_year_untouched() {
        let dates = days(d(2019, 2, 27), d(2019, 3, 1));
        let bal = [1.0, 2.0, 3.0];
        let f = fold_leap_days(&dates, &bal).unwrap();
        assert_eq!(f.balance(), &bal);
        assert_eq!(f.n_folded(), 0);
    }

    #[test]
    fn missing_half_of_pair_keeps_the_other() {
        let dates = days(d(2016, 2, 28), d(2016, 2, 29));
        let f = fold_leap_days(&dates, &[f64::NAN, 3.0]).unwrap();
        assert_eq!(f.balance(), &[3.0]);
        let f = fold_leap_days(&dates, &[2.0, f64::NAN]).unwrap();
        assert_eq!(f.balance(), &[2.0]);
    }

    #[test]
    fn missing_pair_stays_missing() {
        let dates = days(d(2016, 2, 28), d(2016, 2, 29));
        let f = fold_leap_days(&dates, &[f64::NAN, f64::NAN]).unwrap();
        assert_eq!(f.balance().len(), 1);
        assert!(f.balance()[0].is_nan());
    }

    #[test]
    fn series_starting_on_leap_day_is_rejected() {
        let dates = days(d(2020, 2, 29), d(2020, 3, 3));
        let err = fold_leap_days(&dates, &[0.0; 4]).unwrap_err();
        assert_eq!(err, SpeiError::UnpairedLeapDay { date: d(2020, 2, 29) });
    }

    #[test]
    fn multiple_leap_years() {
        let dates = days(d(2015, 1, 1), d(2024, 12, 31));
        let bal: Vec<f64> = (0..dates.len()).map(|i| i as f64).collect();
        let f = fold_leap_days(&dates, &bal).unwrap();
        assert_eq!(f.n_folded(), 3); // 2016, 2020, 2024
        assert_eq!(f.balance().len(), 10 * 365);
        let feb28_2016 = dates.iter().position(|&x| x == d(2016, 2, 28)).unwrap();
        let kept = f.rows().iter().position(|&r| r == feb28_2016).unwrap();
        assert_eq!(f.balance()[kept], feb28_2016 as f64 + 0.5);
    }
}
