//! The arbiter: per-pair contact record and sequential-impulse solver.
//!
//! An arbiter is rebuilt from scratch every step by the narrow phase;
//! persistence across frames happens by transplanting accumulated
//! impulses from the previous frame's arbiter for the same pair key
//! (`carry_over`), matched contact-by-contact via feature identity.
//!
//! Per step the world calls, in order: `carry_over` (optional),
//! `pre_step`, then `solve_iteration` a fixed number of times. All
//! three mutate body velocity state through the `BodySet` and fail
//! with `StaleBody` if either handle has expired.

use planar_body::{BodyHandle, BodySet};
use planar_math::{cross, cross_scalar, perp, Vec2};
use planar_types::constants::{ALLOWED_PENETRATION, BIAS_FACTOR};
use planar_types::{PairKey, PlanarError, PlanarResult};

use crate::contact::ContactPoint;

/// Contact constraint state for one overlapping body pair.
///
/// `a` is the reference body chosen by the SAT tie-break; the normal
/// is the outward normal of the reference face and points from A
/// toward B for the lifetime of this instance.
#[derive(Debug, Clone)]
pub struct Arbiter {
    a: BodyHandle,
    b: BodyHandle,
    key: PairKey,
    normal: Vec2,
    contacts: Vec<ContactPoint>,
}

impl Arbiter {
    /// Builds an arbiter from a freshly constructed manifold.
    ///
    /// Callers must guarantee a non-empty contact list; the narrow
    /// phase never constructs an arbiter without retained contacts.
    pub(crate) fn new(
        a: BodyHandle,
        b: BodyHandle,
        key: PairKey,
        normal: Vec2,
        contacts: Vec<ContactPoint>,
    ) -> Self {
        debug_assert!(!contacts.is_empty());
        Self {
            a,
            b,
            key,
            normal,
            contacts,
        }
    }

    /// Order-independent pair key for persistence bookkeeping.
    #[inline]
    pub fn key(&self) -> PairKey {
        self.key
    }

    /// Contact normal, pointing from body A toward body B.
    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// The contact points, in manifold order.
    #[inline]
    pub fn contacts(&self) -> &[ContactPoint] {
        &self.contacts
    }

    /// The referenced body handles `(a, b)`.
    #[inline]
    pub fn handles(&self) -> (BodyHandle, BodyHandle) {
        (self.a, self.b)
    }

    /// True if both referenced bodies are still alive in `bodies`.
    pub fn is_live(&self, bodies: &BodySet) -> bool {
        bodies.contains(self.a) && bodies.contains(self.b)
    }

    /// Transplants accumulated impulses from the previous frame's
    /// arbiter for the same pair, then immediately re-applies them to
    /// the bodies at this frame's lever arms (warm start).
    ///
    /// Contacts with no match in `previous` keep zero impulse.
    pub fn carry_over(&mut self, bodies: &mut BodySet, previous: &Arbiter) -> PlanarResult<()> {
        let tangent = perp(self.normal);
        let (body_a, body_b) = bodies.pair_mut(self.a, self.b)?;

        for contact in &mut self.contacts {
            let Some(old) = previous.contacts.iter().find(|c| contact.matches(c)) else {
                continue;
            };
            contact.normal_impulse = old.normal_impulse;
            contact.tangent_impulse = old.tangent_impulse;

            let p = self.normal * contact.normal_impulse + tangent * contact.tangent_impulse;
            body_a.apply_impulse(-p, contact.ra);
            body_b.apply_impulse(p, contact.rb);
        }
        Ok(())
    }

    /// Precomputes effective masses and the Baumgarte bias velocity.
    ///
    /// Must run once per step, after `carry_over` and before any solve
    /// iteration.
    pub fn pre_step(&mut self, bodies: &BodySet, dt: f32) -> PlanarResult<()> {
        if dt <= 0.0 {
            return Err(PlanarError::InvalidConfig(format!(
                "timestep must be positive, got {dt}"
            )));
        }

        let tangent = perp(self.normal);
        let body_a = bodies.get(self.a)?;
        let body_b = bodies.get(self.b)?;
        let linear = body_a.inv_mass() + body_b.inv_mass();

        for contact in &mut self.contacts {
            let ra_n = cross(contact.ra, self.normal);
            let rb_n = cross(contact.rb, self.normal);
            let kn = linear + body_a.inv_inertia() * ra_n * ra_n + body_b.inv_inertia() * rb_n * rb_n;

            let ra_t = cross(contact.ra, tangent);
            let rb_t = cross(contact.rb, tangent);
            let kt = linear + body_a.inv_inertia() * ra_t * ra_t + body_b.inv_inertia() * rb_t * rb_t;

            contact.mass_normal = 1.0 / kn;
            contact.mass_tangent = 1.0 / kt;
            contact.bias_velocity =
                -BIAS_FACTOR / dt * (contact.separation + ALLOWED_PENETRATION).min(0.0);
        }
        Ok(())
    }

    /// One projected Gauss-Seidel pass over this arbiter's contacts.
    ///
    /// Each contact reads the bodies' current (partially updated)
    /// velocities, so contacts sharing a body influence each other
    /// within the pass. The accumulated normal impulse is clamped
    /// non-negative and the tangent impulse into the friction cone.
    pub fn solve_iteration(&mut self, bodies: &mut BodySet) -> PlanarResult<()> {
        let tangent = perp(self.normal);
        let (body_a, body_b) = bodies.pair_mut(self.a, self.b)?;
        let friction = (body_a.friction() * body_b.friction()).sqrt();

        for contact in &mut self.contacts {
            let dv = (body_b.velocity + cross_scalar(body_b.angular_velocity, contact.rb))
                - (body_a.velocity + cross_scalar(body_a.angular_velocity, contact.ra));

            // Normal impulse, clamped so the accumulated total stays
            // non-negative (one-sided constraint).
            let vn = dv.dot(self.normal);
            let dpn = (contact.bias_velocity - vn) * contact.mass_normal;
            let dpn = (contact.normal_impulse + dpn).max(0.0) - contact.normal_impulse;
            contact.normal_impulse += dpn;

            // Friction impulse, accumulated total clamped into the cone
            // sized by the just-updated normal impulse, so the cone
            // bound holds after every iteration.
            let vt = dv.dot(tangent);
            let dpt = -vt * contact.mass_tangent;
            let max_pt = friction * contact.normal_impulse;
            let dpt = (contact.tangent_impulse + dpt).clamp(-max_pt, max_pt)
                - contact.tangent_impulse;
            contact.tangent_impulse += dpt;

            let p = self.normal * dpn + tangent * dpt;
            body_a.apply_impulse(-p, contact.ra);
            body_b.apply_impulse(p, contact.rb);
        }
        Ok(())
    }
}
