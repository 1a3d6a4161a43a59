//! Rigid body state and the capability surface the solver consumes.
//!
//! A body owns its shape, motion state, and material friction. The
//! contact crate only ever touches bodies through the accessor and
//! impulse methods defined here.

use planar_math::{cross, Mat2, Vec2};
use planar_types::{BodyId, PlanarError, PlanarResult};
use serde::{Deserialize, Serialize};

use crate::polygon::ConvexPolygon;

/// A 2D rigid body with a convex polygon shape.
///
/// Static bodies (ground, walls) carry zero inverse mass and inverse
/// inertia; the solver moves them by exactly nothing without special
/// casing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    id: BodyId,
    shape: ConvexPolygon,

    /// World position of the body origin (not the centroid).
    pub position: Vec2,
    /// Orientation in radians.
    pub rotation: f32,
    /// Linear velocity of the centroid.
    pub velocity: Vec2,
    /// Angular velocity (radians/s, positive = counter-clockwise).
    pub angular_velocity: f32,

    /// Accumulated external force, cleared after integration.
    pub force: Vec2,
    /// Accumulated external torque, cleared after integration.
    pub torque: f32,

    inv_mass: f32,
    inv_inertia: f32,
    friction: f32,
}

impl RigidBody {
    /// Creates a dynamic body with mass properties derived from the
    /// shape and a uniform density.
    pub fn dynamic(
        id: BodyId,
        shape: ConvexPolygon,
        density: f32,
        friction: f32,
        position: Vec2,
    ) -> PlanarResult<Self> {
        if density <= 0.0 {
            return Err(PlanarError::InvalidConfig(format!(
                "density must be positive, got {density}"
            )));
        }
        if friction < 0.0 {
            return Err(PlanarError::InvalidConfig(format!(
                "friction must be non-negative, got {friction}"
            )));
        }

        let mass = density * shape.area();
        let inertia = density * shape.second_moment();

        Ok(Self {
            id,
            shape,
            position,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            inv_mass: 1.0 / mass,
            inv_inertia: 1.0 / inertia,
            friction,
        })
    }

    /// Creates an immovable body (infinite mass and inertia).
    pub fn fixed(
        id: BodyId,
        shape: ConvexPolygon,
        friction: f32,
        position: Vec2,
    ) -> PlanarResult<Self> {
        if friction < 0.0 {
            return Err(PlanarError::InvalidConfig(format!(
                "friction must be non-negative, got {friction}"
            )));
        }
        Ok(Self {
            id,
            shape,
            position,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            inv_mass: 0.0,
            inv_inertia: 0.0,
            friction,
        })
    }

    /// Stable unique body id, used for the collision pair key.
    #[inline]
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// The body's shape.
    #[inline]
    pub fn shape(&self) -> &ConvexPolygon {
        &self.shape
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    #[inline]
    pub fn inv_inertia(&self) -> f32 {
        self.inv_inertia
    }

    #[inline]
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// True if the body can never move.
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.inv_mass == 0.0 && self.inv_inertia == 0.0
    }

    /// Transforms a local-space point to world space.
    #[inline]
    pub fn local_to_world(&self, local: Vec2) -> Vec2 {
        self.position + Mat2::from_angle(self.rotation) * local
    }

    /// World-space position of the shape centroid.
    #[inline]
    pub fn world_centroid(&self) -> Vec2 {
        self.local_to_world(self.shape.centroid())
    }

    /// World-space vertex `i`.
    #[inline]
    pub fn world_vertex(&self, i: usize) -> Vec2 {
        self.local_to_world(self.shape.vertex(i))
    }

    /// World-space edge vector from vertex `i` to `i + 1`.
    #[inline]
    pub fn world_edge(&self, i: usize) -> Vec2 {
        Mat2::from_angle(self.rotation) * self.shape.edge(i)
    }

    /// All vertices transformed to world space.
    pub fn world_vertices(&self) -> Vec<Vec2> {
        let rot = Mat2::from_angle(self.rotation);
        self.shape
            .vertices()
            .iter()
            .map(|&v| self.position + rot * v)
            .collect()
    }

    /// Applies an impulse at lever arm `r` (from the centroid).
    ///
    /// Mutates linear and angular velocity immediately; a fixed body is
    /// unaffected since both inverse terms are zero.
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += self.inv_inertia * cross(r, impulse);
    }

    /// Integrates accumulated forces and gravity into velocity, then
    /// clears the accumulators. Fixed bodies are skipped entirely.
    pub fn integrate_forces(&mut self, dt: f32, gravity: Vec2) {
        if self.is_fixed() {
            self.force = Vec2::ZERO;
            self.torque = 0.0;
            return;
        }
        self.velocity += (gravity + self.force * self.inv_mass) * dt;
        self.angular_velocity += self.torque * self.inv_inertia * dt;
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    /// Integrates velocity into position and rotation.
    pub fn integrate_velocities(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;
    }
}
