//! Convex polygon shape with validated winding and mass properties.
//!
//! All geometric degeneracy checks happen here, at construction time,
//! so the narrow phase and solver never have to guard against
//! zero-length edges or inverted winding mid-computation.

use planar_math::{cross, Vec2};
use planar_types::constants::EPSILON;
use planar_types::{PlanarError, PlanarResult};
use serde::{Deserialize, Serialize};

/// A convex polygon in local space, wound counter-clockwise.
///
/// Vertices are stored relative to the body origin; the centroid is
/// precomputed and generally differs from the origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvexPolygon {
    vertices: Vec<Vec2>,
    centroid: Vec2,
    area: f32,
}

impl ConvexPolygon {
    /// Validates and builds a polygon from a counter-clockwise vertex loop.
    ///
    /// Rejects loops with fewer than 3 vertices, near-zero-length edges,
    /// clockwise or self-intersecting winding (non-positive signed area),
    /// and concave corners.
    pub fn new(vertices: Vec<Vec2>) -> PlanarResult<Self> {
        let n = vertices.len();
        if n < 3 {
            return Err(PlanarError::InvalidShape(format!(
                "polygon needs at least 3 vertices, got {n}"
            )));
        }

        for i in 0..n {
            let edge = vertices[(i + 1) % n] - vertices[i];
            if edge.length_squared() <= EPSILON * EPSILON {
                return Err(PlanarError::InvalidShape(format!(
                    "zero-length edge at vertex {i}"
                )));
            }
        }

        // Convexity and winding in one pass: every corner of a convex
        // CCW loop turns left (non-negative edge cross product).
        for i in 0..n {
            let e0 = vertices[(i + 1) % n] - vertices[i];
            let e1 = vertices[(i + 2) % n] - vertices[(i + 1) % n];
            if cross(e0, e1) < -EPSILON {
                return Err(PlanarError::InvalidShape(format!(
                    "concave or clockwise corner at vertex {}",
                    (i + 1) % n
                )));
            }
        }

        let area = signed_area(&vertices);
        if area <= EPSILON {
            return Err(PlanarError::InvalidShape(format!(
                "non-positive signed area {area}; vertices must wind counter-clockwise"
            )));
        }

        let centroid = centroid_of(&vertices, area);

        Ok(Self {
            vertices,
            centroid,
            area,
        })
    }

    /// Number of vertices (equals number of edges).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Local-space vertex `i`.
    #[inline]
    pub fn vertex(&self, i: usize) -> Vec2 {
        self.vertices[i]
    }

    /// Edge vector from vertex `i` to vertex `i + 1` (wrapping).
    #[inline]
    pub fn edge(&self, i: usize) -> Vec2 {
        let n = self.vertices.len();
        self.vertices[(i + 1) % n] - self.vertices[i]
    }

    /// All local-space vertices.
    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Polygon area.
    #[inline]
    pub fn area(&self) -> f32 {
        self.area
    }

    /// Local-space centroid.
    #[inline]
    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    /// Second moment of area about the centroid.
    ///
    /// Multiply by density to get the moment of inertia of a uniform
    /// lamina. Uses the standard polygon integral about the origin,
    /// then the parallel-axis shift to the centroid.
    pub fn second_moment(&self) -> f32 {
        let n = self.vertices.len();
        let mut i_origin = 0.0;
        for i in 0..n {
            let v0 = self.vertices[i];
            let v1 = self.vertices[(i + 1) % n];
            let c = cross(v0, v1);
            i_origin += c * (v0.length_squared() + v0.dot(v1) + v1.length_squared());
        }
        i_origin /= 12.0;
        i_origin - self.area * self.centroid.length_squared()
    }
}

fn signed_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    let mut twice_area = 0.0;
    for i in 0..n {
        twice_area += cross(vertices[i], vertices[(i + 1) % n]);
    }
    twice_area * 0.5
}

fn centroid_of(vertices: &[Vec2], area: f32) -> Vec2 {
    let n = vertices.len();
    let mut c = Vec2::ZERO;
    for i in 0..n {
        let v0 = vertices[i];
        let v1 = vertices[(i + 1) % n];
        c += (v0 + v1) * cross(v0, v1);
    }
    c / (6.0 * area)
}
