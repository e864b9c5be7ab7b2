//! Lookup of site SPEI values for dated acquisitions.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use spei_core::OutputColumns;
use spei_io::{CsvTable, IoError, format_value, parse_date, read_index};
use tracing::{debug, error};

use crate::error::SiteError;
use crate::layout::SiteLayout;

/// Value written for acquisitions without an index value.
pub const MISSING_SENTINEL: f64 = -9999.0;

pub const SITE_COLUMN: &str = "name";
pub const ACQUISITION_DATE_COLUMN: &str = "date";

/// Settings for [`attach_spei`].
#[derive(Debug, Clone)]
pub struct AttachConfig {
    window: usize,
    drop_missing: bool,
}

impl AttachConfig {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            drop_missing: false,
        }
    }

    /// Remove acquisitions without a value instead of writing the sentinel.
    pub fn with_drop_missing(mut self, drop_missing: bool) -> Self {
        self.drop_missing = drop_missing;
        self
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn drop_missing(&self) -> bool {
        self.drop_missing
    }

    /// Name of the attached column, `SPEI_{k}`.
    pub fn column(&self) -> String {
        format!("SPEI_{}", self.window)
    }
}

/// Counts from one lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachSummary {
    pub n_rows: usize,
    pub n_missing: usize,
    pub n_dropped: usize,
}

/// Adds column `SPEI_{k}` to `table`.
///
/// Each row is matched by its `name` and `date` cells against the site's
/// persisted SPEI table. Rows without a value get [`MISSING_SENTINEL`], or
/// are removed when `drop_missing` is set.
///
/// # Errors
///
/// Returns [`SiteError::Io`] if `table` lacks the `name` or `date` column,
/// holds unparseable dates, or a site table exists but cannot be read.
pub fn attach_spei(
    table: &mut CsvTable,
    layout: &SiteLayout,
    config: &AttachConfig,
) -> Result<AttachSummary, SiteError> {
    let sites: Vec<String> = table
        .column(SITE_COLUMN)?
        .into_iter()
        .map(str::to_string)
        .collect();
    let dates = table
        .column(ACQUISITION_DATE_COLUMN)?
        .into_iter()
        .enumerate()
        .map(|(row, cell)| {
            parse_date(cell).ok_or_else(|| IoError::Validation {
                count: 1,
                details: format!("row {row}: invalid acquisition date '{cell}'"),
            })
        })
        .collect::<Result<Vec<NaiveDate>, IoError>>()?;

    let mut lookup: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
    for site in sites.iter().map(String::as_str).collect::<BTreeSet<_>>() {
        let column = OutputColumns::new(config.window(), site).index;
        let values = match read_index(&layout.spei_path(site), &column) {
            Ok(v) => v,
            Err(IoError::FileNotFound { path }) => {
                error!(site = %site, path = %path.display(), "no SPEI table for site");
                BTreeMap::new()
            }
            Err(IoError::MissingColumn { name, path }) => {
                error!(site = %site, column = %name, path = %path.display(), "SPEI not computed for site");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        debug!(site = %site, n_days = values.len(), "loaded SPEI");
        lookup.insert(site, values);
    }

    let values: Vec<f64> = sites
        .iter()
        .zip(&dates)
        .map(|(site, date)| {
            lookup
                .get(site.as_str())
                .and_then(|m| m.get(date))
                .copied()
                .filter(|v| v.is_finite())
                .unwrap_or(f64::NAN)
        })
        .collect();

    let keep: Vec<bool> = values.iter().map(|v| v.is_finite()).collect();
    let n_missing = keep.iter().filter(|k| !**k).count();
    if n_missing > 0 {
        for ((site, date), _) in sites.iter().zip(&dates).zip(&keep).filter(|(_, k)| !**k) {
            error!(site = %site, date = %date, "no SPEI value for acquisition");
        }
        error!(n_missing, n_rows = values.len(), "acquisitions without SPEI");
    }

    table.set_column(
        &config.column(),
        values
            .iter()
            .map(|&v| format_value(if v.is_finite() { v } else { MISSING_SENTINEL }))
            .collect(),
    );
    let n_dropped = if config.drop_missing() {
        table.retain_rows(&keep);
        n_missing
    } else {
        0
    };

    Ok(AttachSummary {
        n_rows: table.n_rows(),
        n_missing,
        n_dropped,
    })
}
