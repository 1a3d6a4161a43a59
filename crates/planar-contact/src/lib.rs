//! # planar-contact
//!
//! Narrow-phase collision detection and contact resolution for convex
//! polygon rigid bodies.
//!
//! The contact pipeline is split into three phases:
//! 1. **Separating-axis test** — Finds the face axis of maximal
//!    separation between two convex polygons.
//! 2. **Manifold construction** — Selects a reference face and incident
//!    vertex neighborhood, producing up to three contact points.
//! 3. **Sequential-impulse solve** — Projected Gauss-Seidel iteration
//!    over accumulated normal/friction impulses with a Baumgarte
//!    position bias, warm-started from the previous frame's arbiter.
//!
//! A separate penalty module handles deformable-contour vs. rigid-body
//! push-out; it shares the SAT overlap gate but none of the impulse
//! machinery.

pub mod arbiter;
pub mod clip;
pub mod coloring;
pub mod contact;
pub mod manifold;
pub mod narrow;
pub mod penalty;
pub mod sat;

pub use arbiter::Arbiter;
pub use coloring::batch_arbiters;
pub use contact::{ContactPoint, Feature};
pub use manifold::ManifoldMode;
pub use narrow::{detect, detect_with_mode, Detection};
pub use penalty::{resolve_penalty, DeformableContour, PenaltyResult};
pub use sat::{best_axis, SatResult};
