//! Engine output.

use chrono::NaiveDate;
use spei_calendar::SeriesBounds;

/// Output column names for one site and window, built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputColumns {
    /// Rolling balance column, `BAL_{k}`.
    pub balance: String,
    /// Index column, `SPEI{k}_{site}`.
    pub index: String,
}

impl OutputColumns {
    pub fn new(window: usize, site: &str) -> Self {
        Self {
            balance: format!("BAL_{window}"),
            index: format!("SPEI{window}_{site}"),
        }
    }
}

/// Daily SPEI for one site.
///
/// Rows follow the input series with every February 29th removed. All
/// columns have the same length.
#[derive(Debug, Clone)]
pub struct SpeiResult {
    dates: Vec<NaiveDate>,
    precipitation: Vec<f64>,
    pet: Vec<f64>,
    balance: Vec<f64>,
    rolling: Vec<f64>,
    index: Vec<f64>,
    window: usize,
    bounds: SeriesBounds,
    n_folded: usize,
}

impl SpeiResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        dates: Vec<NaiveDate>,
        precipitation: Vec<f64>,
        pet: Vec<f64>,
        balance: Vec<f64>,
        rolling: Vec<f64>,
        index: Vec<f64>,
        window: usize,
        bounds: SeriesBounds,
        n_folded: usize,
    ) -> Self {
        Self {
            dates,
            precipitation,
            pet,
            balance,
            rolling,
            index,
            window,
            bounds,
            n_folded,
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn precipitation(&self) -> &[f64] {
        &self.precipitation
    }

    pub fn pet(&self) -> &[f64] {
        &self.pet
    }

    /// Daily balance after leap-day folding.
    pub fn balance(&self) -> &[f64] {
        &self.balance
    }

    /// Trailing mean balance over the window.
    pub fn rolling(&self) -> &[f64] {
        &self.rolling
    }

    /// Standardised index.
    pub fn index(&self) -> &[f64] {
        &self.index
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn bounds(&self) -> &SeriesBounds {
        &self.bounds
    }

    /// Number of February 29ths folded into February 28th.
    pub fn n_folded(&self) -> usize {
        self.n_folded
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First and last date covered.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((*self.dates.first()?, *self.dates.last()?))
    }

    /// Number of rows with a finite index value.
    pub fn n_valid(&self) -> usize {
        self.index.iter().filter(|v| v.is_finite()).count()
    }
}
