//! Day-of-year stratification of the rolling balance.

use spei_calendar::{Doy, SeriesBounds};

/// Rolling values sharing one day of year, in year order.
///
/// Only real rows are held; the boundary placeholders are added back after
/// the transform. Entries may still be NaN where the rolling mean is
/// undefined.
#[derive(Debug, Clone)]
pub struct Stratum {
    doy: Doy,
    values: Vec<f64>,
}

impl Stratum {
    pub fn doy(&self) -> Doy {
        self.doy
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of years in which this DOY has a real row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Splits `rolling` into 365 strata, DOY 1 first.
///
/// `rolling` is indexed like the labelled series described by `bounds`.
pub fn gather_strata(rolling: &[f64], bounds: &SeriesBounds) -> Vec<Stratum> {
    Doy::all()
        .map(|doy| {
            let values = (bounds.start_year()..=bounds.end_year())
                .filter_map(|year| bounds.row_index(year, doy))
                .filter_map(|row| rolling.get(row).copied())
                .collect();
            Stratum { doy, values }
        })
        .collect()
}

/// Number of years for which `doy` has a real row.
pub(crate) fn expected_len(bounds: &SeriesBounds, doy: Doy) -> usize {
    let pads =
        usize::from(bounds.missing_in_first_year(doy)) + usize::from(bounds.missing_in_last_year(doy));
    bounds.n_years().saturating_sub(pads)
}
