//! 2D cross products and perpendicular helpers.
//!
//! In 2D the cross product collapses to a scalar (the out-of-plane
//! component), and angular velocity is a scalar that crosses back into
//! the plane as a perpendicular vector. These two operations carry all
//! of the torque/lever-arm arithmetic in the contact solver.

use glam::Vec2;
use planar_types::constants::EPSILON;

/// 2D cross product: the z component of `a × b`.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Scalar-vector cross product: `w × v` for angular velocity `w`.
///
/// This is the in-plane velocity of a point at offset `v` from the
/// rotation center.
#[inline]
pub fn cross_scalar(w: f32, v: Vec2) -> Vec2 {
    Vec2::new(-w * v.y, w * v.x)
}

/// Clockwise perpendicular: `(v.y, -v.x)`.
///
/// For a counter-clockwise vertex loop this rotates an edge vector onto
/// its outward normal direction; applied to a contact normal it yields
/// the tangent used for friction.
#[inline]
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Unit outward normal of an edge vector.
///
/// Degenerate (near zero-length) edges are rejected at polygon
/// construction; if one slips through in release builds the denominator
/// is clamped to avoid producing NaN.
#[inline]
pub fn edge_normal(edge: Vec2) -> Vec2 {
    let n = perp(edge);
    let len = n.length();
    debug_assert!(len > EPSILON, "zero-length edge reached normalization");
    n / len.max(EPSILON)
}
