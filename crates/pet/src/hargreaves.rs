//! Hargreaves (1985) reference evapotranspiration.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::error::PetError;
use crate::solar::extraterrestrial_radiation;

/// Converts MJ m⁻² day⁻¹ to equivalent evaporation in mm day⁻¹.
const MJ_TO_MM: f64 = 0.408;
const HARGREAVES_COEFFICIENT: f64 = 0.0023;
const HARGREAVES_OFFSET: f64 = 17.8;

/// Site latitude in degrees, validated to `-90..=90`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latitude(f64);

impl Latitude {
    /// Creates a latitude from decimal degrees.
    ///
    /// # Errors
    ///
    /// Returns [`PetError::InvalidLatitude`] if `degrees` is non-finite or
    /// outside `-90..=90`.
    pub fn new(degrees: f64) -> Result<Self, PetError> {
        if !degrees.is_finite() || degrees.abs() > 90.0 {
            return Err(PetError::InvalidLatitude { latitude: degrees });
        }
        Ok(Self(degrees))
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

/// Daily Hargreaves PET in mm day⁻¹.
///
/// Returns NaN if any temperature is missing or `tmax < tmin`.
pub fn hargreaves(tmin: f64, tmax: f64, tmean: f64, latitude: Latitude, doy: u32) -> f64 {
    let range = tmax - tmin;
    if range.is_nan() || range < 0.0 || !tmean.is_finite() {
        return f64::NAN;
    }
    let ra = extraterrestrial_radiation(latitude.radians(), doy);
    HARGREAVES_COEFFICIENT * (tmean + HARGREAVES_OFFSET) * range.sqrt() * MJ_TO_MM * ra
}

/// Output of [`hargreaves_series`].
#[derive(Debug, Clone)]
pub struct PetResult {
    pet: Vec<f64>,
    n_missing: usize,
}

impl PetResult {
    pub fn pet(&self) -> &[f64] {
        &self.pet
    }

    /// Number of days without a PET value.
    pub fn n_missing(&self) -> usize {
        self.n_missing
    }

    pub fn into_pet(self) -> Vec<f64> {
        self.pet
    }
}

/// Hargreaves PET for a daily series at one site.
///
/// `dates`, `tmin`, `tmax` and `tmean` are parallel slices. A series whose
/// last day of year is below 365 ends on a partial year; that is logged at
/// `warn` but otherwise accepted.
///
/// # Errors
///
/// Returns [`PetError::EmptyData`] for empty input and
/// [`PetError::LengthMismatch`] when the slices differ in length.
pub fn hargreaves_series(
    dates: &[NaiveDate],
    tmin: &[f64],
    tmax: &[f64],
    tmean: &[f64],
    latitude: Latitude,
) -> Result<PetResult, PetError> {
    let n = dates.len();
    if n == 0 {
        return Err(PetError::EmptyData);
    }
    for (field, len) in [("tmin", tmin.len()), ("tmax", tmax.len()), ("tmean", tmean.len())] {
        if len != n {
            return Err(PetError::LengthMismatch {
                expected: n,
                got: len,
                field: field.to_string(),
            });
        }
    }

    if let Some(last) = dates.last()
        && last.ordinal() < 365
    {
        warn!(
            last = %last,
            doy = last.ordinal(),
            "series ends on a partial year"
        );
    }

    let pet: Vec<f64> = (0..n)
        .map(|i| hargreaves(tmin[i], tmax[i], tmean[i], latitude, dates[i].ordinal()))
        .collect();
    let n_missing = pet.iter().filter(|v| v.is_nan()).count();
    debug!(n_days = n, n_missing, latitude = latitude.degrees(), "hargreaves pet");

    Ok(PetResult { pet, n_missing })
}
