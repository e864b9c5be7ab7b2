//! Statistical helper functions for daily SPEI computation.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `descriptive` | Mean, SD, type-7 quantiles and IQR |
//! | `rolling` | Right-aligned NaN-skipping trailing mean |
//! | `kde` | Gaussian kernel density estimate with bandwidth selection |
//! | `probit` | Rational approximation to the inverse standard-normal CDF |

mod descriptive;
mod kde;
mod probit;
mod rolling;

pub use kde::{Bandwidth, GaussianKde};
pub use probit::probit;
pub use rolling::trailing_mean;
