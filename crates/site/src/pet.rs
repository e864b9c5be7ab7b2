//! Site forcing from station climate.

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use rayon::prelude::*;
use spei_io::{IoError, read_climate, write_forcing};
use spei_pet::{Latitude, hargreaves_series};
use tracing::{error, info, info_span, warn};

use crate::error::SiteError;
use crate::layout::SiteLayout;

/// Result of deriving forcing for one site.
#[derive(Debug, Clone, PartialEq)]
pub enum PetOutcome {
    /// The forcing table was written.
    Written {
        path: PathBuf,
        n_days: usize,
        n_missing: usize,
    },
    /// The forcing table exists and overwrite is off.
    AlreadyExists { path: PathBuf },
    /// The climate table does not exist.
    DataUnavailable { path: PathBuf },
}

/// Outcome of one site in a multi-site forcing run.
#[derive(Debug)]
pub struct PetReport {
    site: String,
    outcome: Result<PetOutcome, SiteError>,
}

impl PetReport {
    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn outcome(&self) -> &Result<PetOutcome, SiteError> {
        &self.outcome
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}

impl fmt::Display for PetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(PetOutcome::Written {
                path,
                n_days,
                n_missing,
            }) => write!(
                f,
                "{}: wrote {n_days} days ({n_missing} missing PET) -> {}",
                self.site,
                path.display()
            ),
            Ok(PetOutcome::AlreadyExists { path }) => {
                write!(f, "{}: forcing exists ({})", self.site, path.display())
            }
            Ok(PetOutcome::DataUnavailable { path }) => {
                write!(f, "{}: no climate data ({})", self.site, path.display())
            }
            Err(e) => write!(f, "{}: failed: {e}", self.site),
        }
    }
}

/// Writes `{site}/eobs_spei_{site}.csv` (`time`, `pre`, `pet`) from the
/// site's climate table using Hargreaves PET.
///
/// # Errors
///
/// Returns [`SiteError`] for an invalid latitude, an unreadable climate
/// table, or a write failure.
pub fn derive_forcing(
    layout: &SiteLayout,
    site: &str,
    latitude: f64,
    epoch: NaiveDate,
    overwrite: bool,
) -> Result<PetOutcome, SiteError> {
    let _span = info_span!("pet", site = %site).entered();
    let latitude = Latitude::new(latitude)?;
    let out = layout.spei_path(site);
    if out.exists() && !overwrite {
        info!(path = %out.display(), "forcing exists");
        return Ok(PetOutcome::AlreadyExists { path: out });
    }

    let climate = match read_climate(&layout.climate_path(site), epoch) {
        Ok(c) => c,
        Err(IoError::FileNotFound { path }) => {
            warn!(path = %path.display(), "climate not found, skipping");
            return Ok(PetOutcome::DataUnavailable { path });
        }
        Err(e) => return Err(e.into()),
    };

    let pet = hargreaves_series(
        climate.dates(),
        climate.tmin(),
        climate.tmax(),
        climate.tmean(),
        latitude,
    )?;
    write_forcing(&out, epoch, climate.dates(), climate.precipitation(), pet.pet())?;
    info!(
        path = %out.display(),
        n_days = climate.len(),
        n_missing = pet.n_missing(),
        "wrote forcing"
    );
    Ok(PetOutcome::Written {
        path: out,
        n_days: climate.len(),
        n_missing: pet.n_missing(),
    })
}

/// Derives forcing for every `(site, latitude)`, isolating failures.
///
/// Reports come back in the order of `sites`.
pub fn derive_forcing_sites(
    layout: &SiteLayout,
    sites: &[(String, f64)],
    epoch: NaiveDate,
    overwrite: bool,
) -> Vec<PetReport> {
    sites
        .par_iter()
        .map(|(site, latitude)| {
            let outcome = derive_forcing(layout, site, *latitude, epoch, overwrite);
            if let Err(e) = &outcome {
                error!(site = %site, error = %e, "forcing failed");
            }
            PetReport {
                site: site.clone(),
                outcome,
            }
        })
        .collect()
}
