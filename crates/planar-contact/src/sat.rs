//! Separating-axis test over world-space vertex loops.
//!
//! For each face normal of one polygon, the signed distance from that
//! face's supporting line to the other polygon's support point is the
//! separation along that axis. A non-negative separation on any axis
//! proves the polygons do not overlap.

use planar_math::{edge_normal, Vec2};

/// Best axis found by [`best_axis`].
#[derive(Debug, Clone, Copy)]
pub struct SatResult {
    /// Index of the edge whose outward normal is the best axis.
    pub axis: usize,
    /// Separation along that axis (negative = penetrating).
    pub separation: f32,
}

/// Finds the face axis of `own` with the largest separation to `other`.
///
/// Both slices are world-space, counter-clockwise vertex loops. The
/// returned separation is the least-negative support distance over all
/// of `own`'s face normals; if it is `>= 0` the loops do not overlap
/// along any of `own`'s faces.
pub fn best_axis(own: &[Vec2], other: &[Vec2]) -> SatResult {
    debug_assert!(own.len() >= 3 && other.len() >= 3);

    let mut best = SatResult {
        axis: 0,
        separation: f32::NEG_INFINITY,
    };

    for i in 0..own.len() {
        let v = own[i];
        let n = edge_normal(own[(i + 1) % own.len()] - v);

        // Support-point projection: the most penetrating vertex of
        // `other` against this face.
        let mut min_dist = f32::INFINITY;
        for &o in other {
            min_dist = min_dist.min((o - v).dot(n));
        }

        if min_dist > best.separation {
            best = SatResult {
                axis: i,
                separation: min_dist,
            };
        }
    }

    best
}
