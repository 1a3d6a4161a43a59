//! Narrow-phase entry point: SAT overlap test + manifold construction.
//!
//! `detect` is the operation the world loop calls per candidate pair.
//! It always yields the pair's persistence key, even when no arbiter is
//! produced, so the caller can evict a cached arbiter for a pair that
//! stopped overlapping this frame.

use planar_body::{BodyHandle, BodySet};
use planar_math::edge_normal;
use planar_types::{PairKey, PlanarResult};

use crate::arbiter::Arbiter;
use crate::manifold::{self, ManifoldMode};
use crate::sat::best_axis;

/// Outcome of a narrow-phase query for one body pair.
#[derive(Debug)]
pub struct Detection {
    /// Order-independent persistence key for the pair.
    pub key: PairKey,
    /// The contact arbiter, absent when the bodies do not overlap or
    /// the manifold retained no contacts.
    pub arbiter: Option<Arbiter>,
}

/// Narrow-phase test with the default manifold heuristic.
pub fn detect(bodies: &BodySet, a: BodyHandle, b: BodyHandle) -> PlanarResult<Detection> {
    detect_with_mode(bodies, a, b, ManifoldMode::default())
}

/// Narrow-phase test with an explicit manifold strategy.
///
/// Runs the SAT in both directions; overlap requires a negative
/// separation on both bodies' best axes. The body with the larger
/// (shallower) separation becomes the reference: its axis is the more
/// reliable separating direction, and the contact normal is that
/// face's outward normal, pointing from the reference body toward the
/// incident body. Pairs of fixed bodies are never reported: static
/// scenery may overlap and there is nothing to resolve.
pub fn detect_with_mode(
    bodies: &BodySet,
    a: BodyHandle,
    b: BodyHandle,
    mode: ManifoldMode,
) -> PlanarResult<Detection> {
    let body_a = bodies.get(a)?;
    let body_b = bodies.get(b)?;
    let key = PairKey::new(body_a.id(), body_b.id());

    // Two immovable bodies have no effective mass along any axis; a
    // contact between them would make every constraint singular.
    if body_a.is_fixed() && body_b.is_fixed() {
        return Ok(Detection { key, arbiter: None });
    }

    let verts_a = body_a.world_vertices();
    let verts_b = body_b.world_vertices();

    let sat_ab = best_axis(&verts_a, &verts_b);
    if sat_ab.separation >= 0.0 {
        return Ok(Detection { key, arbiter: None });
    }
    let sat_ba = best_axis(&verts_b, &verts_a);
    if sat_ba.separation >= 0.0 {
        return Ok(Detection { key, arbiter: None });
    }

    // Reference role goes to the shallower axis. An exact tie is
    // broken by body id, not argument order, so detect(A,B) and
    // detect(B,A) pick the same reference face and produce identical
    // manifolds.
    let a_is_reference = if sat_ab.separation != sat_ba.separation {
        sat_ab.separation > sat_ba.separation
    } else {
        body_a.id().raw() <= body_b.id().raw()
    };
    let (reference, incident, ref_handle, inc_handle, ref_axis, inc_axis) = if a_is_reference {
        (body_a, body_b, a, b, sat_ab.axis, sat_ba.axis)
    } else {
        (body_b, body_a, b, a, sat_ba.axis, sat_ab.axis)
    };

    let normal = edge_normal(reference.world_edge(ref_axis));
    let contacts = manifold::build(reference, incident, ref_axis, inc_axis, normal, mode)?;

    if contacts.is_empty() {
        // SAT reported overlap but every candidate sat on the positive
        // side of the reference face. No arbiter: callers assume a
        // returned arbiter has at least one contact.
        tracing::debug!(?key, "manifold retained no contacts, dropping pair");
        return Ok(Detection { key, arbiter: None });
    }

    Ok(Detection {
        key,
        arbiter: Some(Arbiter::new(ref_handle, inc_handle, key, normal, contacts)),
    })
}
