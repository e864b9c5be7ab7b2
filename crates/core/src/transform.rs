//! Per-stratum KDE fit and probability-to-index transform.

use rayon::prelude::*;
use spei_calendar::{Doy, SeriesBounds};
use spei_stats::{GaussianKde, probit};
use tracing::trace;

use crate::config::SpeiConfig;
use crate::error::SpeiError;
use crate::strata::{Stratum, expected_len};

/// Index values for one day of year, one per calendar year of the series.
///
/// Placeholder years (before the first or after the last row) hold NaN.
#[derive(Debug, Clone)]
pub struct StratumIndex {
    doy: Doy,
    values: Vec<f64>,
}

impl StratumIndex {
    pub fn doy(&self) -> Doy {
        self.doy
    }

    /// Values in year order, `start_year` first.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Fits a KDE to the finite values of `stratum` and maps each value to
/// `probit(cdf(x))`.
///
/// Missing values stay missing. The result is padded with NaN for the
/// first and last calendar years when they have no row at this DOY.
///
/// # Errors
///
/// Returns [`SpeiError::InvariantViolation`] if the fit does not yield one
/// probability per finite value, or the padded result does not cover
/// every year.
pub fn transform_stratum(
    stratum: &Stratum,
    bounds: &SeriesBounds,
    config: &SpeiConfig,
) -> Result<StratumIndex, SpeiError> {
    let doy = stratum.doy();
    let expected_real = expected_len(bounds, doy);
    if stratum.len() != expected_real {
        return Err(SpeiError::InvariantViolation {
            doy: doy.get(),
            expected: expected_real,
            got: stratum.len(),
        });
    }

    let finite: Vec<f64> = stratum
        .values()
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    let probs = if finite.is_empty() {
        Vec::new()
    } else {
        GaussianKde::fit(&finite, config.bandwidth(), config.min_bandwidth())
            .map(|kde| {
                trace!(doy = doy.get(), n = finite.len(), h = kde.bandwidth(), "stratum fit");
                kde.cdf_at_points()
            })
            .unwrap_or_default()
    };
    if probs.len() != finite.len() {
        return Err(SpeiError::InvariantViolation {
            doy: doy.get(),
            expected: finite.len(),
            got: probs.len(),
        });
    }

    let mut probs = probs.into_iter();
    let mut values = Vec::with_capacity(bounds.n_years());
    if bounds.missing_in_first_year(doy) {
        values.push(f64::NAN);
    }
    for &x in stratum.values() {
        let z = if x.is_finite() {
            probs.next().map_or(f64::NAN, probit)
        } else {
            f64::NAN
        };
        values.push(z);
    }
    if bounds.missing_in_last_year(doy) {
        values.push(f64::NAN);
    }

    if values.len() != bounds.n_years() {
        return Err(SpeiError::InvariantViolation {
            doy: doy.get(),
            expected: bounds.n_years(),
            got: values.len(),
        });
    }
    Ok(StratumIndex { doy, values })
}

/// Transforms every stratum, on the rayon pool when `config.parallel()`.
///
/// The first failing stratum aborts the whole run.
pub fn transform_strata(
    strata: &[Stratum],
    bounds: &SeriesBounds,
    config: &SpeiConfig,
) -> Result<Vec<StratumIndex>, SpeiError> {
    if config.parallel() {
        strata
            .par_iter()
            .map(|s| transform_stratum(s, bounds, config))
            .collect()
    } else {
        strata
            .iter()
            .map(|s| transform_stratum(s, bounds, config))
            .collect()
    }
}
