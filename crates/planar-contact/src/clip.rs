//! Edge clipping against reference side planes.
//!
//! Used by the optional `ManifoldMode::Clip` path: the incident edge is
//! clipped Sutherland-Hodgman style against every side plane of the
//! reference polygon except the reference face itself, producing a
//! proper two-point manifold.

use planar_math::{cross, Vec2};
use planar_types::constants::EPSILON;
use planar_types::{PlanarError, PlanarResult};

use crate::contact::{ContactPoint, Feature};

/// Clips a two-point segment against the side plane of the reference
/// edge `v0 → v1` (interior is to the left of the edge direction for a
/// counter-clockwise loop).
///
/// Returns the surviving points: both, one plus an interpolated
/// crossing point, or fewer. A crossing point is tagged with a clipped
/// feature so it keeps a stable identity across frames.
pub fn clip_segment(
    input: &[ContactPoint; 2],
    clip_edge: usize,
    v0: Vec2,
    v1: Vec2,
) -> PlanarResult<Vec<ContactPoint>> {
    let dir = (v1 - v0).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Err(PlanarError::DegenerateGeometry(format!(
            "zero-length clip edge {clip_edge}"
        )));
    }

    // Signed distance to the right of the edge direction; interior
    // points of a CCW loop measure <= 0.
    let d0 = cross(input[0].position - v0, dir);
    let d1 = cross(input[1].position - v0, dir);

    let mut out = Vec::with_capacity(2);
    if d0 <= 0.0 {
        out.push(input[0].clone());
    }
    if d1 <= 0.0 {
        out.push(input[1].clone());
    }

    // Straddling: interpolate the crossing point.
    if d0 * d1 < 0.0 {
        let denom = d0 - d1;
        if denom.abs() <= EPSILON {
            return Err(PlanarError::DegenerateGeometry(format!(
                "clip denominator vanished on edge {clip_edge}"
            )));
        }
        let position = (input[0].position * -d1 + input[1].position * d0) / denom;
        debug_assert!(position.is_finite(), "clip produced non-finite point");

        // The crossing inherits the incident index of the point that
        // was cut away, keeping the feature pair unique per corner.
        let outside = if d0 > 0.0 { &input[0] } else { &input[1] };
        out.push(ContactPoint::new(
            position,
            Feature::clipped(clip_edge, outside.feature.indices[1] as usize),
        ));
    }

    debug_assert!(out.len() <= 2);
    Ok(out)
}
