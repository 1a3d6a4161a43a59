//! Contact point data and cross-frame feature identity.
//!
//! A contact point is one constraint site: a world position, a signed
//! separation, lever arms to both centroids, and the accumulated
//! impulses the solver maintains. The `Feature` pair records which
//! vertices/edges produced the point so the same physical contact can
//! be recognized again next frame for warm-starting.

use planar_math::Vec2;
use serde::{Deserialize, Serialize};

/// Identity of the geometric features that produced a contact point.
///
/// Vertex candidates carry the incident vertex index twice with both
/// flags clear; points synthesized by edge clipping mark the first slot
/// as a reference-body edge index.
#[derive(Debug, Clone, Copy, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Vertex or edge indices on the producing bodies.
    pub indices: [u32; 2],
    /// Whether each index refers to the reference body.
    pub from_reference: [bool; 2],
}

impl Feature {
    /// Feature for an incident-body vertex candidate.
    pub fn vertex(index: usize) -> Self {
        Self {
            indices: [index as u32; 2],
            from_reference: [false; 2],
        }
    }

    /// Feature for a point produced by clipping the incident edge
    /// against a reference side plane.
    pub fn clipped(reference_edge: usize, incident_vertex: usize) -> Self {
        Self {
            indices: [reference_edge as u32, incident_vertex as u32],
            from_reference: [true, false],
        }
    }
}

impl PartialEq for Feature {
    /// Feature identity is symmetric: if the reference/incident roles
    /// flipped between frames, both members of both pairs appear
    /// swapped, and the features must still compare equal.
    fn eq(&self, other: &Self) -> bool {
        if self.indices == other.indices && self.from_reference == other.from_reference {
            return true;
        }
        let swapped_indices = [self.indices[1], self.indices[0]];
        let swapped_refs = [self.from_reference[1], self.from_reference[0]];
        swapped_indices == other.indices && swapped_refs == other.from_reference
    }
}

/// A single contact constraint site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPoint {
    /// World-space contact position.
    pub position: Vec2,
    /// Signed gap along the contact normal; `<= 0` for every retained
    /// point (negative = penetrating).
    pub separation: f32,
    /// Lever arm from body A's centroid to the contact.
    pub ra: Vec2,
    /// Lever arm from body B's centroid to the contact.
    pub rb: Vec2,

    /// Accumulated normal impulse (never negative).
    pub normal_impulse: f32,
    /// Accumulated tangent impulse (bounded by the friction cone).
    pub tangent_impulse: f32,

    /// Effective mass along the normal (reciprocal of the constraint's
    /// generalized inverse mass), computed in `pre_step`.
    pub mass_normal: f32,
    /// Effective mass along the tangent.
    pub mass_tangent: f32,
    /// Baumgarte bias velocity pushing residual penetration out.
    pub bias_velocity: f32,

    /// Cross-frame identity for warm-start matching.
    pub feature: Feature,
}

impl ContactPoint {
    /// Creates a contact at `position` with zero accumulated state.
    pub fn new(position: Vec2, feature: Feature) -> Self {
        Self {
            position,
            separation: 0.0,
            ra: Vec2::ZERO,
            rb: Vec2::ZERO,
            normal_impulse: 0.0,
            tangent_impulse: 0.0,
            mass_normal: 0.0,
            mass_tangent: 0.0,
            bias_velocity: 0.0,
            feature,
        }
    }

    /// True if this point and `other` describe the same physical
    /// contact (feature identity, role-swap tolerant).
    #[inline]
    pub fn matches(&self, other: &ContactPoint) -> bool {
        self.feature == other.feature
    }
}
