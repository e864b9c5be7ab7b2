//! First/last-year coverage of a labelled daily series.

use crate::date::NoLeapDate;
use crate::doy::Doy;
use crate::error::CalendarError;

/// Coverage of a contiguous no-leap series.
///
/// The first calendar year only contributes DOYs `start_doy..=365` and the
/// last calendar year only `1..=end_doy`; every `(year, doy)` pair outside
/// that region is a placeholder, not data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesBounds {
    start: NoLeapDate,
    end: NoLeapDate,
}

impl SeriesBounds {
    /// Bounds from the first and last labels of a series.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::EmptySeries`] for an empty slice.
    pub fn from_labels(labels: &[NoLeapDate]) -> Result<Self, CalendarError> {
        match (labels.first(), labels.last()) {
            (Some(&start), Some(&end)) => Ok(Self { start, end }),
            _ => Err(CalendarError::EmptySeries),
        }
    }

    /// First label of the series.
    pub fn start(&self) -> NoLeapDate {
        self.start
    }

    /// Last label of the series.
    pub fn end(&self) -> NoLeapDate {
        self.end
    }

    pub fn start_doy(&self) -> Doy {
        self.start.doy()
    }

    pub fn end_doy(&self) -> Doy {
        self.end.doy()
    }

    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    pub fn end_year(&self) -> i32 {
        self.end.year()
    }

    /// Number of calendar years touched by the series, partial ones included.
    pub fn n_years(&self) -> usize {
        (self.end.year() - self.start.year() + 1) as usize
    }

    /// Number of rows spanned, `start` and `end` inclusive.
    pub fn n_rows(&self) -> usize {
        (self.end.days_since(self.start) + 1) as usize
    }

    /// `true` when DOY `doy` has no row in the first calendar year.
    pub fn missing_in_first_year(&self, doy: Doy) -> bool {
        doy < self.start.doy()
    }

    /// `true` when DOY `doy` has no row in the last calendar year.
    pub fn missing_in_last_year(&self, doy: Doy) -> bool {
        doy > self.end.doy()
    }

    /// `true` when `(year, doy)` lies before the start or after the end.
    pub fn is_placeholder(&self, year: i32, doy: Doy) -> bool {
        let label = NoLeapDate::from_year_doy(year, doy);
        label < self.start || label > self.end
    }

    /// Row index of `(year, doy)`, or `None` for a placeholder.
    pub fn row_index(&self, year: i32, doy: Doy) -> Option<usize> {
        if self.is_placeholder(year, doy) {
            return None;
        }
        let offset = NoLeapDate::from_year_doy(year, doy).days_since(self.start);
        usize::try_from(offset).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(y: i32, m: u8, d: u8) -> NoLeapDate {
        NoLeapDate::new(y, m, d).unwrap()
    }

    fn doy(d: u16) -> Doy {
        Doy::new(d).unwrap()
    }

    #[test]
    fn empty_is_error() {
        assert_eq!(
            SeriesBounds::from_labels(&[]).unwrap_err(),
            CalendarError::EmptySeries
        );
    }

    #[test]
    fn bookkeeping_three_partial_years() {
        let b = SeriesBounds::from_labels(&[label(2018, 7, 1), label(2020, 3, 15)]).unwrap();
        assert_eq!(b.start_doy().get(), 182);
        assert_eq!(b.end_doy().get(), 74);
        assert_eq!(b.start_year(), 2018);
        assert_eq!(b.end_year(), 2020);
        assert_eq!(b.n_years(), 3);
        assert_eq!(b.n_rows(), (365 - 182 + 1) + 365 + 74);
    }

    #[test]
    fn placeholders_at_both_ends() {
        let b = SeriesBounds::from_labels(&[label(2018, 7, 1), label(2020, 3, 15)]).unwrap();
        assert!(b.missing_in_first_year(doy(100)));
        assert!(!b.missing_in_first_year(doy(182)));
        assert!(b.missing_in_last_year(doy(75)));
        assert!(!b.missing_in_last_year(doy(74)));

        assert!(b.is_placeholder(2018, doy(181)));
        assert!(!b.is_placeholder(2018, doy(182)));
        assert!(!b.is_placeholder(2019, doy(1)));
        assert!(b.is_placeholder(2020, doy(75)));
        assert!(b.is_placeholder(2021, doy(1)));
    }

    #[test]
    fn row_index_matches_offsets() {
        let b = SeriesBounds::from_labels(&[label(2018, 7, 1), label(2020, 3, 15)]).unwrap();
        assert_eq!(b.row_index(2018, doy(182)), Some(0));
        assert_eq!(b.row_index(2019, doy(1)), Some(184));
        assert_eq!(b.row_index(2020, doy(74)), Some(b.n_rows() - 1));
        assert_eq!(b.row_index(2018, doy(1)), None);
        assert_eq!(b.row_index(2020, doy(200)), None);
    }

    #[test]
    fn single_year_excludes_both_sides() {
        let b = SeriesBounds::from_labels(&[label(2021, 3, 10), label(2021, 9, 30)]).unwrap();
        assert_eq!(b.n_years(), 1);
        assert!(b.missing_in_first_year(doy(10)));
        assert!(b.missing_in_last_year(doy(300)));
        assert!(b.is_placeholder(2021, doy(10)));
        assert!(b.is_placeholder(2021, doy(300)));
        assert_eq!(b.row_index(2021, doy(69)), Some(0));
    }
}
