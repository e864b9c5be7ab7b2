//! Non-parametric daily SPEI.
//!
//! The Standardized Precipitation-Evapotranspiration Index is computed per
//! day of year: the trailing mean water balance of each day is compared
//! against the same calendar day in every other year through a Gaussian
//! kernel density estimate, and its cumulative probability is mapped to a
//! standard-normal quantile.
//!
//! # Pipeline
//!
//! 1. **Leap days**: Feb 29 is averaged into Feb 28, skipping a missing half, and dropped
//! 2. **Labeling**: each remaining row gets a no-leap `(year, doy)`
//! 3. **Rolling mean**: right-aligned, NaN-skipping, window `k`
//! 4. **Strata**: one vector per DOY, in year order
//! 5. **Transform**: KDE CDF then rational probit, strata in parallel
//! 6. **Reassembly**: single-threaded, by `(year, doy)` row arithmetic

mod config;
mod error;
mod leap;
mod reassemble;
mod result;
mod series;
mod strata;
mod transform;

pub use config::{DEFAULT_MIN_BANDWIDTH, DEFAULT_WINDOW, SpeiConfig};
pub use error::SpeiError;
pub use leap::{LeapFolded, fold_leap_days};
pub use reassemble::reassemble;
pub use result::{OutputColumns, SpeiResult};
pub use series::DailySeries;
pub use strata::{Stratum, gather_strata};
pub use transform::{StratumIndex, transform_stratum, transform_strata};

pub use spei_stats::Bandwidth;

use chrono::NaiveDate;
use spei_calendar::{SeriesBounds, label_series};
use spei_stats::trailing_mean;
use tracing::{debug, info};

/// Computes the daily SPEI of `series`.
///
/// # Errors
///
/// - [`SpeiError::InvalidConfig`] if `config` fails validation.
/// - [`SpeiError::UnpairedLeapDay`] if a Feb 29 has no Feb 28.
/// - [`SpeiError::Calendar`] if the series is empty after leap-day removal.
/// - [`SpeiError::InvariantViolation`] or [`SpeiError::ReassemblyMismatch`]
///   if a stratum does not produce one value per input.
pub fn compute_spei(series: &DailySeries, config: &SpeiConfig) -> Result<SpeiResult, SpeiError> {
    config.validate()?;

    let folded = fold_leap_days(series.dates(), series.balance())?;
    let pick = |col: &[f64]| -> Vec<f64> { folded.rows().iter().map(|&r| col[r]).collect() };
    let dates: Vec<NaiveDate> = folded.rows().iter().map(|&r| series.dates()[r]).collect();

    let labels = label_series(&dates)?;
    let bounds = SeriesBounds::from_labels(&labels)?;
    debug!(
        start = %series.start(),
        end = %series.end(),
        start_doy = bounds.start_doy().get(),
        end_doy = bounds.end_doy().get(),
        n_years = bounds.n_years(),
        n_folded = folded.n_folded(),
        "series bounds"
    );

    let rolling = trailing_mean(folded.balance(), config.window());
    let strata = gather_strata(&rolling, &bounds);
    let buffers = transform_strata(&strata, &bounds, config)?;
    let index = reassemble(&buffers, &bounds)?;

    let result = SpeiResult::new(
        dates,
        pick(series.precipitation()),
        pick(series.pet()),
        folded.balance().to_vec(),
        rolling,
        index,
        config.window(),
        bounds,
        folded.n_folded(),
    );
    info!(
        window = config.window(),
        n_rows = result.len(),
        n_valid = result.n_valid(),
        "spei computed"
    );
    Ok(result)
}
