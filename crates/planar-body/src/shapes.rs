//! Procedural shape generators for tests and demos.
//!
//! All generators produce counter-clockwise loops centered on their
//! centroid, so body position and world centroid coincide.

use planar_math::Vec2;
use planar_types::{PlanarError, PlanarResult};

use crate::polygon::ConvexPolygon;

/// Generates an axis-aligned box centered at the origin.
///
/// # Example
/// ```
/// use planar_body::shapes::box_polygon;
/// let unit = box_polygon(1.0, 1.0).unwrap();
/// assert_eq!(unit.vertex_count(), 4);
/// assert!((unit.area() - 1.0).abs() < 1e-6);
/// ```
pub fn box_polygon(width: f32, height: f32) -> PlanarResult<ConvexPolygon> {
    if width <= 0.0 || height <= 0.0 {
        return Err(PlanarError::InvalidShape(format!(
            "box dimensions must be positive, got {width}×{height}"
        )));
    }
    let hw = width / 2.0;
    let hh = height / 2.0;
    ConvexPolygon::new(vec![
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
    ])
}

/// Generates a regular polygon with `sides` vertices on a circle of
/// `radius`, first vertex on the +X axis.
pub fn regular_polygon(sides: usize, radius: f32) -> PlanarResult<ConvexPolygon> {
    if sides < 3 {
        return Err(PlanarError::InvalidShape(format!(
            "regular polygon needs at least 3 sides, got {sides}"
        )));
    }
    if radius <= 0.0 {
        return Err(PlanarError::InvalidShape(format!(
            "radius must be positive, got {radius}"
        )));
    }
    let vertices = (0..sides)
        .map(|i| {
            let theta = 2.0 * std::f32::consts::PI * i as f32 / sides as f32;
            Vec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect();
    ConvexPolygon::new(vertices)
}
