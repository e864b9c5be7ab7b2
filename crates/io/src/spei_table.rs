//! The persisted per-site SPEI table.
//!
//! Columns: `Date`, `time`, `pre`, `pet`, `BAL_{k}`, `SPEI{k}_{site}`, then
//! any columns of other windows already in the file. Every input day is
//! written; February 29th keeps its forcing but has no balance or index
//! value.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use spei_core::{DailySeries, OutputColumns, SpeiResult};
use tracing::debug;

use crate::error::IoError;
use crate::forcing::{PET_COLUMN, PRECIPITATION_COLUMN, TIME_COLUMN, date_to_offset};
use crate::table::{CsvTable, MISSING, format_value, parse_value};
use crate::validate::ValidationCollector;

pub const DATE_COLUMN: &str = "Date";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Writes `result` next to the forcing of `series`.
///
/// `result` rows must be a date-ordered subset of `series` rows. Columns of
/// an existing table at `path` other than the six written here (for
/// example the index of another window) are carried over by day offset.
pub fn write_spei_table(
    path: &Path,
    epoch: NaiveDate,
    series: &DailySeries,
    result: &SpeiResult,
    columns: &OutputColumns,
) -> Result<(), IoError> {
    let mut headers = vec![
        DATE_COLUMN.to_string(),
        TIME_COLUMN.to_string(),
        PRECIPITATION_COLUMN.to_string(),
        PET_COLUMN.to_string(),
        columns.balance.clone(),
        columns.index.clone(),
    ];
    let (extra, carried) = carried_columns(path, &headers)?;
    headers.extend(extra.iter().cloned());
    let mut table = CsvTable::new(path, headers);

    let mut j = 0;
    for (i, &date) in series.dates().iter().enumerate() {
        let (rolling, index) = if result.dates().get(j) == Some(&date) {
            let cells = (
                format_value(result.rolling()[j]),
                format_value(result.index()[j]),
            );
            j += 1;
            cells
        } else {
            (MISSING.to_string(), MISSING.to_string())
        };
        let offset = date_to_offset(epoch, date);
        let mut row = vec![
            date.format(DATE_FORMAT).to_string(),
            offset.to_string(),
            format_value(series.precipitation()[i]),
            format_value(series.pet()[i]),
            rolling,
            index,
        ];
        match carried.get(&offset) {
            Some(cells) => row.extend(cells.iter().cloned()),
            None => row.extend(extra.iter().map(|_| MISSING.to_string())),
        }
        table.push_row(row);
    }
    table.write()?;
    debug!(
        path = %path.display(),
        n_rows = table.n_rows(),
        n_carried = extra.len(),
        "wrote spei table"
    );
    Ok(())
}

/// Extra columns of the table at `path` and their cells keyed by day offset.
///
/// Empty when no table exists or it has no `time` column.
fn carried_columns(
    path: &Path,
    rewritten: &[String],
) -> Result<(Vec<String>, BTreeMap<i64, Vec<String>>), IoError> {
    let table = match CsvTable::read(path) {
        Ok(t) => t,
        Err(IoError::FileNotFound { .. }) => return Ok(Default::default()),
        Err(e) => return Err(e),
    };
    let Ok(time) = table.numeric_column(TIME_COLUMN) else {
        return Ok(Default::default());
    };
    let extra: Vec<String> = table
        .headers()
        .iter()
        .filter(|h| !rewritten.contains(h))
        .cloned()
        .collect();
    if extra.is_empty() {
        return Ok(Default::default());
    }

    let cells = extra
        .iter()
        .map(|name| table.column(name))
        .collect::<Result<Vec<_>, _>>()?;
    let carried = time
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_finite())
        .map(|(row, &t)| {
            let values = cells.iter().map(|col| col[row].to_string()).collect();
            (t as i64, values)
        })
        .collect();
    Ok((extra, carried))
}

/// `true` when `path` exists and has a column named `column`.
pub fn has_column(path: &Path, column: &str) -> Result<bool, IoError> {
    Ok(CsvTable::read_headers(path)?.is_some_and(|h| h.iter().any(|c| c == column)))
}

/// Reads column `column` of a SPEI table keyed by its `Date` column.
///
/// Missing values are kept as NaN.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::MissingColumn`], or
/// [`IoError::Validation`] for unparseable dates and values.
pub fn read_index(path: &Path, column: &str) -> Result<BTreeMap<NaiveDate, f64>, IoError> {
    let table = CsvTable::read(path)?;
    let dates = table.column(DATE_COLUMN)?;
    let values = table.column(column)?;

    let mut c = ValidationCollector::new();
    let mut out = BTreeMap::new();
    for (row, (d, v)) in dates.iter().zip(values).enumerate() {
        let date = match parse_date(d) {
            Some(date) => date,
            None => {
                c.push(format!("row {row}: invalid date '{d}'"));
                continue;
            }
        };
        match parse_value(v) {
            Some(value) => {
                out.insert(date, value);
            }
            None => c.push(format!("row {row}: cannot parse '{v}'")),
        }
    }
    c.finish()?;
    Ok(out)
}

/// Parses an ISO `YYYY-MM-DD` date cell.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), DATE_FORMAT).ok()
}
