//! Error types for U-Cartonize.

use thiserror::Error;

/// Result type alias for U-Cartonize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during packing operations.
///
/// Capacity failures are not errors: an item that fits no container, or a
/// group that cannot be fully placed, is reported through the unplaced set of
/// the returned result.
#[derive(Debug, Error)]
pub enum Error {
    /// Non-positive dimension or weight on an item, or an invalid container type.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// The container-type list was empty.
    #[error("No containers available: at least one container type is required")]
    NoContainersAvailable,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A packing result broke an overlap, bounds, weight or conservation invariant.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}
