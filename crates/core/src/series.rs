//! Validated daily input series.

use chrono::NaiveDate;

use crate::error::SpeiError;

/// Daily precipitation, PET and water balance for one site.
///
/// Exactly one row per Gregorian day, ascending and contiguous. Missing
/// values are NaN. The balance column is derived at construction.
#[derive(Debug, Clone)]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    precipitation: Vec<f64>,
    pet: Vec<f64>,
    balance: Vec<f64>,
}

impl DailySeries {
    /// Builds a series from parallel columns.
    ///
    /// # Errors
    ///
    /// - [`SpeiError::EmptySeries`] if `dates` is empty.
    /// - [`SpeiError::LengthMismatch`] if a value column differs in length.
    /// - [`SpeiError::NotContiguous`] if any date is not the day after its
    ///   predecessor.
    pub fn new(
        dates: Vec<NaiveDate>,
        precipitation: Vec<f64>,
        pet: Vec<f64>,
    ) -> Result<Self, SpeiError> {
        let n = dates.len();
        if n == 0 {
            return Err(SpeiError::EmptySeries);
        }
        for (field, len) in [("precipitation", precipitation.len()), ("pet", pet.len())] {
            if len != n {
                return Err(SpeiError::LengthMismatch {
                    expected: n,
                    got: len,
                    field: field.to_string(),
                });
            }
        }
        for (row, pair) in dates.windows(2).enumerate() {
            if pair[0].succ_opt() != Some(pair[1]) {
                return Err(SpeiError::NotContiguous {
                    row: row + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }

        let balance = precipitation
            .iter()
            .zip(&pet)
            .map(|(p, e)| p - e)
            .collect();
        Ok(Self {
            dates,
            precipitation,
            pet,
            balance,
        })
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

    pub fn balance(&self) -> &[f64] {
        &self.balance
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always `false`; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First date.
    pub fn start(&self) -> NaiveDate {
        self.dates[0]
    }

    /// Last date.
    pub fn end(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

}
