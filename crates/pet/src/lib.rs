//! Potential evapotranspiration for the SPEI workspace.
//!
//! Temperature-only Hargreaves estimate following FAO Irrigation and
//! Drainage Paper 56: extraterrestrial radiation from latitude and day of
//! year, scaled by the diurnal temperature range.
//!
//! ```ignore
//! use spei_pet::{Latitude, hargreaves_series};
//!
//! let pet = hargreaves_series(&dates, &tn, &tx, &tg, Latitude::new(47.3)?)?;
//! ```

mod error;
mod hargreaves;
mod solar;

pub use error::PetError;
pub use hargreaves::{Latitude, PetResult, hargreaves, hargreaves_series};
pub use solar::{
    SOLAR_CONSTANT, extraterrestrial_radiation, inverse_relative_distance, solar_declination,
    sunset_hour_angle,
};
