//! Error types for the Planar engine.
//!
//! All crates return `PlanarResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Planar engine.
#[derive(Debug, Error)]
pub enum PlanarError {
    /// Shape geometry is malformed (too few vertices, wrong winding,
    /// zero-length edge).
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A body handle refers to a slot that has been freed or reused.
    ///
    /// Raised when an arbiter outlives one of its referenced bodies;
    /// the world is expected to evict such arbiters before stepping.
    #[error("Stale body handle: slot {index} generation {generation}")]
    StaleBody { index: u32, generation: u32 },

    /// A geometric computation hit a degenerate configuration
    /// (zero-length normal, zero clip denominator).
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A solver invariant was violated (e.g., negative accumulated
    /// normal impulse).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, PlanarError>`.
pub type PlanarResult<T> = Result<T, PlanarError>;
