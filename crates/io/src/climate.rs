//! Daily station climate (`time`, `tn`, `tx`, `tg`, `rr`).

use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::IoError;
use crate::forcing::{TIME_COLUMN, offsets_to_dates};
use crate::table::CsvTable;
use crate::validate::validate_unique_dates;

/// Daily minimum, maximum and mean temperature (°C) and precipitation (mm).
#[derive(Debug, Clone)]
pub struct ClimateTable {
    dates: Vec<NaiveDate>,
    tmin: Vec<f64>,
    tmax: Vec<f64>,
    tmean: Vec<f64>,
    precipitation: Vec<f64>,
}

impl ClimateTable {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn tmin(&self) -> &[f64] {
        &self.tmin
    }

    pub fn tmax(&self) -> &[f64] {
        &self.tmax
    }

    pub fn tmean(&self) -> &[f64] {
        &self.tmean
    }

    pub fn precipitation(&self) -> &[f64] {
        &self.precipitation
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Reads a climate table, ordering rows by date.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::MissingColumn`],
/// [`IoError::InvalidTime`], or [`IoError::Validation`] for unparseable
/// values and duplicate dates.
pub fn read_climate(path: &Path, epoch: NaiveDate) -> Result<ClimateTable, IoError> {
    let table = CsvTable::read(path)?;
    let time = table.numeric_column(TIME_COLUMN)?;
    let tmin = table.numeric_column("tn")?;
    let tmax = table.numeric_column("tx")?;
    let tmean = table.numeric_column("tg")?;
    let rr = table.numeric_column("rr")?;
    let dates = offsets_to_dates(epoch, &time)?;

    let mut order: Vec<usize> = (0..dates.len()).collect();
    order.sort_by_key(|&i| dates[i]);
    let pick = |col: &[f64]| -> Vec<f64> { order.iter().map(|&i| col[i]).collect() };
    let sorted: Vec<NaiveDate> = order.iter().map(|&i| dates[i]).collect();
    validate_unique_dates(&sorted).finish()?;

    debug!(path = %path.display(), n_rows = sorted.len(), "read climate table");
    Ok(ClimateTable {
        tmin: pick(&tmin),
        tmax: pick(&tmax),
        tmean: pick(&tmean),
        precipitation: pick(&rr),
        dates: sorted,
    })
}
