//! # planar-body
//!
//! Convex polygon shapes and rigid body state for the Planar engine.
//!
//! ## Key Types
//!
//! - [`ConvexPolygon`] — Validated counter-clockwise vertex loop with
//!   area/centroid/inertia derived from the polygon integrals.
//! - [`RigidBody`] — Position, rotation, velocities, inverse mass and
//!   inertia, friction; exposes the capability surface the contact
//!   solver consumes (world transforms, impulse application).
//! - [`BodySet`] / [`BodyHandle`] — Generational arena owning all
//!   bodies. Handles are weak references: a handle to a removed body
//!   is detected as stale instead of dereferencing freed state.
//! - Procedural shape generators for tests and demos (boxes, regular
//!   polygons).

pub mod body;
pub mod polygon;
pub mod set;
pub mod shapes;

pub use body::RigidBody;
pub use polygon::ConvexPolygon;
pub use set::{BodyHandle, BodySet};
