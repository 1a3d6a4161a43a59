//! # planar-types
//!
//! Shared types, identifiers, error types, and simulation constants
//! for the Planar 2D rigid-body engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Planar crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{PlanarError, PlanarResult};
pub use ids::{BodyId, PairKey};
pub use scalar::Scalar;
