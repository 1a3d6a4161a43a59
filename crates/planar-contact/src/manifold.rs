//! Contact manifold construction from a SAT result.
//!
//! The default manifold is a three-candidate heuristic: the
//! incident body's vertex at the second SAT call's axis index plus its
//! two ring neighbors, filtered by separation against the reference
//! face. Two stricter alternatives are available behind
//! [`ManifoldMode`]: re-deriving the incident edge as the face most
//! anti-parallel to the reference normal, and full edge clipping.

use planar_body::RigidBody;
use planar_math::{edge_normal, Vec2};
use planar_types::PlanarResult;
use serde::{Deserialize, Serialize};

use crate::clip::clip_segment;
use crate::contact::{ContactPoint, Feature};

/// Strategy for selecting candidate contact points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManifoldMode {
    /// Three-candidate heuristic seeded by the second SAT call's axis
    /// index. Cheapest; usually lands on or next to the true incident
    /// neighborhood.
    #[default]
    SatAxis,
    /// Three-candidate heuristic seeded by a dedicated search for the
    /// incident face most anti-parallel to the contact normal. Produces
    /// a better neighborhood on polygons with many faces.
    IncidentSearch,
    /// Full Sutherland-Hodgman clip of the incident edge against all
    /// reference side planes. Produces a proper two-point manifold.
    Clip,
}

/// Finds the incident face: the one whose outward normal is most
/// anti-parallel to the reference contact normal.
pub fn incident_edge(normal: Vec2, incident: &RigidBody) -> usize {
    let count = incident.shape().vertex_count();
    let mut best = 0;
    let mut min_dot = f32::INFINITY;
    for i in 0..count {
        let dot = edge_normal(incident.world_edge(i)).dot(normal);
        if dot < min_dot {
            min_dot = dot;
            best = i;
        }
    }
    best
}

/// Builds the contact point list for a reference/incident pair.
///
/// `normal` is the outward normal of the reference face `reference_axis`
/// (pointing from the reference body toward the incident body).
/// Candidates with positive separation against the reference face are
/// discarded; the result may legitimately be empty, in which case the
/// caller must not construct an arbiter.
pub fn build(
    reference: &RigidBody,
    incident: &RigidBody,
    reference_axis: usize,
    incident_axis: usize,
    normal: Vec2,
    mode: ManifoldMode,
) -> PlanarResult<Vec<ContactPoint>> {
    let candidates = match mode {
        ManifoldMode::SatAxis => vertex_candidates(incident, incident_axis),
        ManifoldMode::IncidentSearch => {
            vertex_candidates(incident, incident_edge(normal, incident))
        }
        ManifoldMode::Clip => clipped_candidates(reference, incident, reference_axis, normal)?,
    };

    let reference_vertex = reference.world_vertex(reference_axis);
    let ref_centroid = reference.world_centroid();
    let inc_centroid = incident.world_centroid();

    let mut contacts = Vec::with_capacity(candidates.len());
    for mut contact in candidates {
        let separation = (contact.position - reference_vertex).dot(normal);
        if separation > 0.0 {
            continue;
        }
        contact.separation = separation;
        contact.ra = contact.position - ref_centroid;
        contact.rb = contact.position - inc_centroid;
        contacts.push(contact);
    }
    Ok(contacts)
}

/// The incident vertex at `axis` plus its two ring neighbors.
fn vertex_candidates(incident: &RigidBody, axis: usize) -> Vec<ContactPoint> {
    let count = incident.shape().vertex_count();
    let prev = (axis + count - 1) % count;
    let next = (axis + 1) % count;

    [prev, axis, next]
        .into_iter()
        .map(|i| ContactPoint::new(incident.world_vertex(i), Feature::vertex(i)))
        .collect()
}

/// The incident edge clipped against every reference side plane except
/// the reference face itself. Returns an empty list when clipping
/// eliminates the segment (grazing configurations).
fn clipped_candidates(
    reference: &RigidBody,
    incident: &RigidBody,
    reference_axis: usize,
    normal: Vec2,
) -> PlanarResult<Vec<ContactPoint>> {
    let inc_axis = incident_edge(normal, incident);
    let inc_count = incident.shape().vertex_count();
    let inc_next = (inc_axis + 1) % inc_count;

    let mut points = vec![
        ContactPoint::new(incident.world_vertex(inc_axis), Feature::vertex(inc_axis)),
        ContactPoint::new(incident.world_vertex(inc_next), Feature::vertex(inc_next)),
    ];

    let ref_count = reference.shape().vertex_count();
    for i in 0..ref_count {
        if i == reference_axis {
            continue;
        }
        let v0 = reference.world_vertex(i);
        let v1 = reference.world_vertex((i + 1) % ref_count);
        let clipped = clip_segment(&[points[0].clone(), points[1].clone()], i, v0, v1)?;
        if clipped.len() < 2 {
            return Ok(Vec::new());
        }
        points = clipped;
    }

    Ok(points)
}
