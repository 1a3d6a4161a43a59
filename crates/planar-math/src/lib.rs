//! # planar-math
//!
//! 2D linear algebra primitives for the Planar engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec2`, `Mat2`) as the canonical math types
//! - 2D cross products (vector × vector → scalar, scalar × vector → vector)
//! - Edge normal / tangent helpers with degenerate-length guards

pub mod ops;

// Re-export glam types as the canonical math types for Planar.
pub use glam::{Mat2, Vec2};

pub use ops::{cross, cross_scalar, edge_normal, perp};
