//! SPEI for one site and for a list of sites.

use std::fmt;
use std::path::PathBuf;

use rayon::prelude::*;
use spei_core::{OutputColumns, SpeiResult, compute_spei};
use spei_io::{IoError, has_column, read_forcing, write_spei_table};
use tracing::{error, info, info_span, warn};

use crate::config::RunConfig;
use crate::error::SiteError;
use crate::layout::SiteLayout;

/// A completed computation.
#[derive(Debug, Clone)]
pub struct ComputedSite {
    result: SpeiResult,
    columns: OutputColumns,
    /// Where the table was written, if persisted.
    persisted: Option<PathBuf>,
    /// Days inserted to close calendar gaps.
    n_filled: usize,
}

impl ComputedSite {
    pub fn result(&self) -> &SpeiResult {
        &self.result
    }

    pub fn columns(&self) -> &OutputColumns {
        &self.columns
    }

    pub fn persisted(&self) -> Option<&PathBuf> {
        self.persisted.as_ref()
    }

    pub fn n_filled(&self) -> usize {
        self.n_filled
    }
}

/// Non-fatal result of processing one site.
#[derive(Debug, Clone)]
pub enum SiteOutcome {
    /// The index was computed.
    Computed(Box<ComputedSite>),
    /// The output already holds the index column and overwrite is off.
    AlreadyComputed { path: PathBuf },
    /// The input table does not exist.
    DataUnavailable { path: PathBuf },
}

/// Outcome of one site in a multi-site run.
#[derive(Debug)]
pub struct SiteReport {
    site: String,
    outcome: Result<SiteOutcome, SiteError>,
}

impl SiteReport {
    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn outcome(&self) -> &Result<SiteOutcome, SiteError> {
        &self.outcome
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}

impl fmt::Display for SiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(SiteOutcome::Computed(c)) => {
                let r = c.result();
                write!(f, "{}: computed", self.site)?;
                if let Some((start, end)) = r.date_range() {
                    write!(f, " {start}..{end}")?;
                }
                write!(f, " ({} rows, {} valid)", r.len(), r.n_valid())?;
                if let Some(path) = c.persisted() {
                    write!(f, " -> {}", path.display())?;
                }
                Ok(())
            }
            Ok(SiteOutcome::AlreadyComputed { path }) => {
                write!(f, "{}: already computed ({})", self.site, path.display())
            }
            Ok(SiteOutcome::DataUnavailable { path }) => {
                write!(f, "{}: no data ({})", self.site, path.display())
            }
            Err(e) => write!(f, "{}: failed: {e}", self.site),
        }
    }
}

/// Computes the SPEI of one site.
///
/// Skips without work when the output already carries the index column
/// and overwrite is off, and when the input table is missing.
///
/// # Errors
///
/// Returns [`SiteError`] for unreadable input, engine failures (including
/// a stratum count mismatch), and write failures.
pub fn run_site(
    layout: &SiteLayout,
    site: &str,
    config: &RunConfig,
) -> Result<SiteOutcome, SiteError> {
    let _span = info_span!("site", site = %site).entered();
    let path = layout.spei_path(site);
    let columns = OutputColumns::new(config.window(), site);

    if !config.overwrite() && has_column(&path, &columns.index)? {
        info!(path = %path.display(), column = %columns.index, "already computed");
        return Ok(SiteOutcome::AlreadyComputed { path });
    }

    let prepared = match read_forcing(&path, config.epoch()) {
        Ok(p) => p,
        Err(IoError::FileNotFound { path }) => {
            warn!(path = %path.display(), "input not found, skipping");
            return Ok(SiteOutcome::DataUnavailable { path });
        }
        Err(e) => return Err(e.into()),
    };
    let n_filled = prepared.n_filled();
    let series = prepared.into_series();
    let result = compute_spei(&series, config.engine())?;

    let persisted = if config.persist() {
        write_spei_table(&path, config.epoch(), &series, &result, &columns)?;
        Some(path)
    } else {
        None
    };
    if let Some((start, end)) = result.date_range() {
        info!(start = %start, end = %end, n_valid = result.n_valid(), "computed");
    }

    Ok(SiteOutcome::Computed(Box::new(ComputedSite {
        result,
        columns,
        persisted,
        n_filled,
    })))
}

/// Runs every site, isolating failures.
///
/// Reports come back in the order of `sites`.
pub fn run_sites(layout: &SiteLayout, sites: &[String], config: &RunConfig) -> Vec<SiteReport> {
    let run = |site: &String| {
        let outcome = run_site(layout, site, config);
        if let Err(e) = &outcome {
            error!(site = %site, error = %e, "site failed");
        }
        SiteReport {
            site: site.clone(),
            outcome,
        }
    };
    if config.parallel_sites() {
        sites.par_iter().map(run).collect()
    } else {
        sites.iter().map(run).collect()
    }
}

/// Number of reports with a fatal failure.
pub fn count_failures(reports: &[SiteReport]) -> usize {
    reports.iter().filter(|r| r.is_failure()).count()
}
