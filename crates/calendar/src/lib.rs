//! # spei-calendar
//!
//! Maps Gregorian daily series onto the 365-day no-leap calendar used for
//! day-of-year stratification.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDate"] -->|"Doy::from_date()"| B["Doy (1..=365)"]
//!     A -->|"NoLeapDate::from_gregorian()"| C["NoLeapDate"]
//!     D["&[NaiveDate]"] -->|"label_series()"| E["Vec of NoLeapDate"]
//!     E -->|"SeriesBounds::from_labels()"| F["SeriesBounds"]
//!     F -->|".row_index(year, doy)"| G["row"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use spei_calendar::{Doy, SeriesBounds, label_series};
//!
//! let labels = label_series(&dates_without_feb_29)?;
//! let bounds = SeriesBounds::from_labels(&labels)?;
//! let row = bounds.row_index(2019, Doy::new(60)?); // Mar 1 2019
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype and month tables |
//! | `date` | No-leap `(year, doy)` label |
//! | `leap` | February 29th helpers |
//! | `label` | Contiguity-checked labeling of a series |
//! | `bounds` | Partial first/last year bookkeeping |
//! | `error` | Error types |

mod bounds;
mod date;
mod doy;
mod error;
mod label;
mod leap;

pub use bounds::SeriesBounds;
pub use date::NoLeapDate;
pub use doy::Doy;
pub use error::CalendarError;
pub use label::label_series;
pub use leap::{feb_28, is_leap_day};
