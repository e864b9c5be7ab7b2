//! Error types for the spei-pet crate.

/// Error type for all fallible operations in the spei-pet crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PetError {
    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when array lengths do not match.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched field.
        field: String,
    },

    /// Returned when a latitude is outside -90..=90 degrees or not finite.
    #[error("invalid latitude: {latitude} (must be finite and within -90..=90 degrees)")]
    InvalidLatitude {
        /// The rejected latitude in degrees.
        latitude: f64,
    },
}
