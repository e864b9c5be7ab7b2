//! Series preparation from the per-site forcing table (`time`, `pre`, `pet`).

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{NaiveDate, TimeDelta};
use spei_core::DailySeries;
use tracing::{debug, warn};

use crate::error::IoError;
use crate::table::{CsvTable, format_value};
use crate::validate::{validate_offsets, validate_unique_dates};

pub const TIME_COLUMN: &str = "time";
pub const PRECIPITATION_COLUMN: &str = "pre";
pub const PET_COLUMN: &str = "pet";

/// Default reference date of the `time` column.
pub fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1950, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// `epoch + offset` days.
///
/// # Errors
///
/// Returns [`IoError::InvalidTime`] if the result is outside chrono's range.
pub fn offset_to_date(epoch: NaiveDate, offset: i64) -> Result<NaiveDate, IoError> {
    TimeDelta::try_days(offset)
        .and_then(|d| epoch.checked_add_signed(d))
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("offset {offset} days from {epoch} is out of range"),
        })
}

/// Whole days from `epoch` to `date`.
pub fn date_to_offset(epoch: NaiveDate, date: NaiveDate) -> i64 {
    (date - epoch).num_days()
}

/// Converts a column of day offsets to dates.
///
/// # Errors
///
/// Returns [`IoError::InvalidTime`] for missing, fractional or out-of-range
/// offsets.
pub fn offsets_to_dates(epoch: NaiveDate, time: &[f64]) -> Result<Vec<NaiveDate>, IoError> {
    validate_offsets(time).finish().map_err(|e| match e {
        IoError::Validation { details, .. } => IoError::InvalidTime { reason: details },
        other => other,
    })?;
    time.iter()
        .map(|&t| offset_to_date(epoch, t as i64))
        .collect()
}

/// A prepared series and the number of days inserted to close gaps.
#[derive(Debug, Clone)]
pub struct PreparedSeries {
    series: DailySeries,
    n_filled: usize,
}

impl PreparedSeries {
    pub fn series(&self) -> &DailySeries {
        &self.series
    }

    pub fn into_series(self) -> DailySeries {
        self.series
    }

    /// Days absent from the input and inserted as missing.
    pub fn n_filled(&self) -> usize {
        self.n_filled
    }
}

/// Builds a [`DailySeries`] from raw forcing columns.
///
/// Rows are ordered by date. Calendar days absent from the input are
/// inserted with missing values so the series is contiguous.
///
/// # Errors
///
/// - [`IoError::InvalidTime`] for bad offsets.
/// - [`IoError::Validation`] for duplicate dates or mismatched lengths.
/// - [`IoError::Series`] if the series cannot be built (e.g. empty input).
pub fn prepare_series(
    epoch: NaiveDate,
    time: &[f64],
    pre: &[f64],
    pet: &[f64],
) -> Result<PreparedSeries, IoError> {
    if pre.len() != time.len() || pet.len() != time.len() {
        return Err(IoError::Validation {
            count: 1,
            details: format!(
                "column lengths differ: time {}, pre {}, pet {}",
                time.len(),
                pre.len(),
                pet.len()
            ),
        });
    }

    let dates = offsets_to_dates(epoch, time)?;
    let mut order: Vec<usize> = (0..dates.len()).collect();
    order.sort_by_key(|&i| dates[i]);
    let sorted: Vec<NaiveDate> = order.iter().map(|&i| dates[i]).collect();
    validate_unique_dates(&sorted).finish()?;

    let by_date: BTreeMap<NaiveDate, usize> = order.iter().map(|&i| (dates[i], i)).collect();
    let (Some(&first), Some(&last)) = (sorted.first(), sorted.last()) else {
        return Err(spei_core::SpeiError::EmptySeries.into());
    };

    let mut out_dates = Vec::new();
    let mut out_pre = Vec::new();
    let mut out_pet = Vec::new();
    let mut n_filled = 0;
    for date in first.iter_days().take_while(|d| *d <= last) {
        out_dates.push(date);
        match by_date.get(&date) {
            Some(&i) => {
                out_pre.push(pre[i]);
                out_pet.push(pet[i]);
            }
            None => {
                out_pre.push(f64::NAN);
                out_pet.push(f64::NAN);
                n_filled += 1;
            }
        }
    }
    if n_filled > 0 {
        warn!(n_filled, start = %first, end = %last, "filled missing calendar days");
    }

    let series = DailySeries::new(out_dates, out_pre, out_pet)?;
    debug!(n_days = series.len(), start = %first, end = %last, "prepared series");
    Ok(PreparedSeries { series, n_filled })
}

/// Reads a forcing table and prepares its series.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] when `path` does not exist, and the
/// errors of [`CsvTable::read`] and [`prepare_series`] otherwise.
pub fn read_forcing(path: &Path, epoch: NaiveDate) -> Result<PreparedSeries, IoError> {
    let table = CsvTable::read(path)?;
    let time = table.numeric_column(TIME_COLUMN)?;
    let pre = table.numeric_column(PRECIPITATION_COLUMN)?;
    let pet = table.numeric_column(PET_COLUMN)?;
    debug!(path = %path.display(), n_rows = table.n_rows(), "read forcing table");
    prepare_series(epoch, &time, &pre, &pet)
}

/// Writes a forcing table with columns `time`, `pre`, `pet`.
pub fn write_forcing(
    path: &Path,
    epoch: NaiveDate,
    dates: &[NaiveDate],
    pre: &[f64],
    pet: &[f64],
) -> Result<(), IoError> {
    let mut table = CsvTable::new(
        path,
        vec![
            TIME_COLUMN.to_string(),
            PRECIPITATION_COLUMN.to_string(),
            PET_COLUMN.to_string(),
        ],
    );
    for ((&date, &p), &e) in dates.iter().zip(pre).zip(pet) {
        table.push_row(vec![
            date_to_offset(epoch, date).to_string(),
            format_value(p),
            format_value(e),
        ]);
    }
    table.write()?;
    debug!(path = %path.display(), n_rows = table.n_rows(), "wrote forcing table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn epoch_offsets() {
        let epoch = default_epoch();
        assert_eq!(epoch, ymd(1950, 1, 1));
        assert_eq!(offset_to_date(epoch, 0).unwrap(), epoch);
        assert_eq!(offset_to_date(epoch, 25567).unwrap(), ymd(2020, 1, 1));
        assert_eq!(offset_to_date(epoch, -1).unwrap(), ymd(1949, 12, 31));
        assert_eq!(date_to_offset(epoch, ymd(2020, 1, 1)), 25567);
        assert!(offset_to_date(epoch, i64::MAX).is_err());
    }

    #[test]
    fn unordered_rows_are_sorted() {
        let r = prepare_series(ymd(2020, 1, 1), &[2.0, 0.0, 1.0], &[3.0, 1.0, 2.0], &[0.0; 3])
            .unwrap();
        assert_eq!(r.series().precipitation(), &[1.0, 2.0, 3.0]);
        assert_eq!(r.series().start(), ymd(2020, 1, 1));
        assert_eq!(r.n_filled(), 0);
    }

    #[test]
    fn gaps_become_missing_days() {
        let r = prepare_series(
            ymd(2020, 1, 1),
            &[0.0, 1.0, 4.0],
            &[1.0, 1.0, 1.0],
            &[0.5, 0.5, 0.5],
        )
        .unwrap();
        let s = r.series();
        assert_eq!(s.len(), 5);
        assert_eq!(r.n_filled(), 2);
        assert!(s.balance()[2].is_nan() && s.balance()[3].is_nan());
        assert_eq!(s.balance()[4], 0.5);
    }

    #[test]
    fn duplicates_rejected() {
        let err = prepare_series(ymd(2020, 1, 1), &[0.0, 0.0], &[1.0, 2.0], &[0.0, 0.0])
            .unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 1, .. }));
    }

    #[test]
    fn fractional_offsets_are_invalid_time() {
        let err = prepare_series(ymd(2020, 1, 1), &[0.0, 0.5], &[1.0; 2], &[0.0; 2]).unwrap_err();
        assert!(matches!(err, IoError::InvalidTime { .. }));
    }

    #[test]
    fn empty_input_is_series_error() {
        let err = prepare_series(ymd(2020, 1, 1), &[], &[], &[]).unwrap_err();
        assert!(matches!(err, IoError::Series { .. }));
    }
}
