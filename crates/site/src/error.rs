//! Error types for the spei-site crate.

use spei_core::SpeiError;
use spei_io::IoError;
use spei_pet::PetError;

/// Error type for a fatal per-site failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SiteError {
    /// Wrapped error from reading or writing site tables.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Wrapped error from the SPEI engine.
    #[error(transparent)]
    Engine(#[from] SpeiError),

    /// Wrapped error from PET derivation.
    #[error(transparent)]
    Pet(#[from] PetError),

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
