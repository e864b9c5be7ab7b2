//! Per-site orchestration for the SPEI workspace.
//!
//! Sites live under one root directory, one subdirectory per site. This
//! crate decides whether a site needs work, runs the engine, persists the
//! result and reports one outcome per site. Failures of one site never
//! abort the others.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `layout` | `{root}/{site}/...` paths |
//! | `run` | Skip policy, engine run, multi-site reports |
//! | `pet` | Forcing table from station climate |
//! | `attach` | SPEI lookup for dated acquisitions |

mod attach;
mod config;
mod error;
mod layout;
mod pet;
mod run;

pub use attach::{
    ACQUISITION_DATE_COLUMN, AttachConfig, AttachSummary, MISSING_SENTINEL, SITE_COLUMN,
    attach_spei,
};
pub use config::RunConfig;
pub use error::SiteError;
pub use layout::SiteLayout;
pub use pet::{PetOutcome, PetReport, derive_forcing, derive_forcing_sites};
pub use run::{ComputedSite, SiteOutcome, SiteReport, count_failures, run_site, run_sites};
