//! Penalty push-out between a deformable contour and a rigid body.
//!
//! This is a deliberately simpler, non-iterative correction: per-vertex
//! nearest-edge projection with velocity decomposition, no impulse
//! accumulation and no warm start. It lives beside the arbiter pipeline
//! but shares nothing with it except the SAT overlap gate.

use planar_body::RigidBody;
use planar_math::{edge_normal, Vec2};
use planar_types::constants::{EPSILON, PENALTY_RESTITUTION};
use planar_types::{PlanarError, PlanarResult};
use serde::{Deserialize, Serialize};

use crate::sat::best_axis;

/// A closed deformable contour: per-vertex positions and velocities in
/// world space, wound counter-clockwise.
///
/// This is the boundary loop of a soft body as seen by the rigid-body
/// collision code; the interior dynamics (springs, projective solve)
/// belong to a different subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeformableContour {
    /// World-space vertex positions.
    pub positions: Vec<Vec2>,
    /// World-space vertex velocities.
    pub velocities: Vec<Vec2>,
}

impl DeformableContour {
    /// Validates and builds a contour.
    pub fn new(positions: Vec<Vec2>, velocities: Vec<Vec2>) -> PlanarResult<Self> {
        if positions.len() < 3 {
            return Err(PlanarError::InvalidShape(format!(
                "contour needs at least 3 vertices, got {}",
                positions.len()
            )));
        }
        if positions.len() != velocities.len() {
            return Err(PlanarError::InvalidShape(format!(
                "contour position/velocity length mismatch: {} vs {}",
                positions.len(),
                velocities.len()
            )));
        }
        let n = positions.len();
        for i in 0..n {
            let edge = positions[(i + 1) % n] - positions[i];
            if edge.length_squared() <= EPSILON * EPSILON {
                return Err(PlanarError::InvalidShape(format!(
                    "zero-length contour edge at vertex {i}"
                )));
            }
        }
        Ok(Self {
            positions,
            velocities,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Edge vector from vertex `i` to `i + 1` (wrapping).
    #[inline]
    fn edge(&self, i: usize) -> Vec2 {
        let n = self.positions.len();
        self.positions[(i + 1) % n] - self.positions[i]
    }
}

/// Counters reported by one penalty resolution pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PenaltyResult {
    /// Contour vertices pushed out of the rigid body.
    pub contour_vertices_corrected: u32,
    /// Rigid-body vertices pushed out of the contour (distributed onto
    /// contour edge endpoints).
    pub body_vertices_corrected: u32,
}

/// Nearest edge of the rigid body to `point`, by absolute face-plane
/// distance.
fn nearest_body_edge(point: Vec2, body: &RigidBody) -> usize {
    let count = body.shape().vertex_count();
    let mut best = 0;
    let mut min_dist = f32::INFINITY;
    for i in 0..count {
        let n = edge_normal(body.world_edge(i));
        let d = (point - body.world_vertex(i)).dot(n).abs();
        if d < min_dist {
            min_dist = d;
            best = i;
        }
    }
    best
}

/// Nearest edge of the contour to `point`.
fn nearest_contour_edge(point: Vec2, contour: &DeformableContour) -> usize {
    let count = contour.vertex_count();
    let mut best = 0;
    let mut min_dist = f32::INFINITY;
    for i in 0..count {
        let n = edge_normal(contour.edge(i));
        let d = (point - contour.positions[i]).dot(n).abs();
        if d < min_dist {
            min_dist = d;
            best = i;
        }
    }
    best
}

/// Resolves interpenetration between a contour and a rigid body.
///
/// Mutates the contour only (positions and velocities); the rigid body
/// is treated as kinematically dominant. Two passes:
///
/// 1. Contour vertices inside the body are projected out along the
///    nearest face normal; their normal velocity is reflected with a
///    small restitution, tangential velocity preserved.
/// 2. Body vertices inside the contour push the two endpoints of the
///    nearest contour edge apart, velocity correction distributed by
///    barycentric weight along the edge.
pub fn resolve_penalty(
    contour: &mut DeformableContour,
    body: &RigidBody,
) -> PlanarResult<PenaltyResult> {
    let mut result = PenaltyResult::default();

    // Overlap gate: same both-sided SAT criterion as the rigid pipeline.
    let body_verts = body.world_vertices();
    if best_axis(&contour.positions, &body_verts).separation >= 0.0 {
        return Ok(result);
    }
    if best_axis(&body_verts, &contour.positions).separation >= 0.0 {
        return Ok(result);
    }

    // Pass 1: contour vertices inside the rigid body.
    let count = contour.vertex_count();
    for i in 0..count {
        let p = contour.positions[i];
        let idx = nearest_body_edge(p, body);
        let n = edge_normal(body.world_edge(idx));
        let v0 = body.world_vertex(idx);
        let v1 = body.world_vertex((idx + 1) % body.shape().vertex_count());

        let separation = (p - v0).dot(n);
        let within_edge = (p - v0).dot(v1 - v0) >= 0.0 && (p - v1).dot(v0 - v1) >= 0.0;
        if separation > 0.0 || !within_edge {
            continue;
        }

        let velocity = contour.velocities[i];
        let normal_part = velocity.dot(n) * n;
        let tangent_part = velocity - normal_part;
        contour.velocities[i] = tangent_part - normal_part * PENALTY_RESTITUTION;
        contour.positions[i] = p - separation * n;
        result.contour_vertices_corrected += 1;
    }

    // Pass 2: rigid-body vertices inside the contour.
    for i in 0..body.shape().vertex_count() {
        let p = body.world_vertex(i);
        let idx = nearest_contour_edge(p, contour);
        let next = (idx + 1) % contour.vertex_count();
        let n = edge_normal(contour.edge(idx));
        let e0 = contour.positions[idx];
        let e1 = contour.positions[next];

        let separation = (p - e0).dot(n);
        let within_edge = (p - e0).dot(e1 - e0) >= 0.0 && (p - e1).dot(e0 - e1) >= 0.0;
        if separation > 0.0 || !within_edge {
            continue;
        }

        // Distribute the normal velocity correction onto the edge
        // endpoints, weighted toward the closer one.
        let l0 = (e0 - p).length();
        let l1 = (e1 - p).length();
        let total = (l0 + l1).max(EPSILON);
        let v_sum = (contour.velocities[idx] + contour.velocities[next]).dot(n) * n;
        contour.velocities[idx] = -(l1 / total) * v_sum;
        contour.velocities[next] = -(l0 / total) * v_sum;

        // Shift the edge so its projection of the body vertex lands on
        // the vertex itself.
        let edge = e1 - e0;
        let projected = e0 + (p - e0).dot(edge) * edge / edge.length_squared().max(EPSILON);
        let shift = p - projected;
        contour.positions[idx] = e0 + shift;
        contour.positions[next] = e1 + shift;
        result.body_vertices_corrected += 1;
    }

    Ok(result)
}
