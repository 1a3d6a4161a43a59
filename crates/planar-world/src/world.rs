//! The simulation world: bodies, arbiter persistence, stepping loop.
//!
//! Each step runs the fixed pipeline: integrate forces → all-pairs
//! narrow phase → warm-start carryover keyed by `PairKey` → pre-step →
//! iterated impulse solve → integrate velocities. Arbiters are rebuilt
//! from scratch every step; only their accumulated impulses persist,
//! transplanted from the previous frame's arbiter for the same pair.

use std::collections::HashMap;
use std::time::Instant;

use planar_body::{BodyHandle, BodySet, ConvexPolygon, RigidBody};
use planar_contact::{detect, Arbiter};
use planar_math::Vec2;
use planar_telemetry::{EventKind, StepEvent, TelemetryBus};
use planar_types::{BodyId, PairKey, PlanarResult};

/// Per-step counters, reported by [`World::step`].
#[derive(Debug, Clone, Copy)]
pub struct StepSummary {
    /// Candidate pairs tested (all-pairs, no broad phase).
    pub pairs_tested: u32,
    /// Arbiters with at least one retained contact.
    pub arbiters: u32,
    /// Total retained contact points.
    pub contacts: u32,
    /// Deepest penetration among retained contacts (meters, >= 0).
    pub max_penetration: f32,
    /// Arbiters that inherited impulses from the previous step.
    pub carried: u32,
    /// Cached arbiters evicted this step.
    pub evicted: u32,
    /// Kinetic energy of all dynamic bodies after integration.
    pub kinetic_energy: f64,
}

/// The simulation world.
pub struct World {
    bodies: BodySet,
    arbiters: HashMap<PairKey, Arbiter>,
    config: crate::WorldConfig,
    telemetry: TelemetryBus,
    next_id: u32,
    step_count: u64,
    sim_time: f64,
}

impl World {
    /// Creates an empty world with a validated configuration.
    pub fn new(config: crate::WorldConfig) -> PlanarResult<Self> {
        config.validate()?;
        Ok(Self {
            bodies: BodySet::new(),
            arbiters: HashMap::new(),
            config,
            telemetry: TelemetryBus::new(),
            next_id: 0,
            step_count: 0,
            sim_time: 0.0,
        })
    }

    /// Spawns a dynamic body with mass derived from shape and density.
    pub fn spawn_dynamic(
        &mut self,
        shape: ConvexPolygon,
        density: f32,
        friction: f32,
        position: Vec2,
    ) -> PlanarResult<BodyHandle> {
        let id = self.allocate_id();
        let body = RigidBody::dynamic(id, shape, density, friction, position)?;
        Ok(self.bodies.insert(body))
    }

    /// Spawns an immovable body (ground, walls).
    pub fn spawn_fixed(
        &mut self,
        shape: ConvexPolygon,
        friction: f32,
        position: Vec2,
    ) -> PlanarResult<BodyHandle> {
        let id = self.allocate_id();
        let body = RigidBody::fixed(id, shape, friction, position)?;
        Ok(self.bodies.insert(body))
    }

    /// Removes a body and drops any cached arbiters referencing it.
    ///
    /// Returns the body, or `None` if the handle was already stale.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let body = self.bodies.remove(handle)?;
        let before = self.arbiters.len();
        self.arbiters.retain(|_, arb| {
            let (a, b) = arb.handles();
            a != handle && b != handle
        });
        tracing::debug!(
            body = body.id().raw(),
            dropped_arbiters = before - self.arbiters.len(),
            "body removed"
        );
        Some(body)
    }

    fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The body arena.
    #[inline]
    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    /// Mutable access to the body arena, for applying forces between steps.
    #[inline]
    pub fn bodies_mut(&mut self) -> &mut BodySet {
        &mut self.bodies
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &crate::WorldConfig {
        &self.config
    }

    /// The telemetry bus, for registering sinks.
    #[inline]
    pub fn telemetry_mut(&mut self) -> &mut TelemetryBus {
        &mut self.telemetry
    }

    /// Cached arbiters from the most recent step.
    pub fn arbiters(&self) -> impl Iterator<Item = &Arbiter> {
        self.arbiters.values()
    }

    /// Number of cached arbiters.
    #[inline]
    pub fn arbiter_count(&self) -> usize {
        self.arbiters.len()
    }

    /// Steps completed so far.
    #[inline]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Accumulated simulation time in seconds.
    #[inline]
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Advances the simulation by one fixed timestep.
    pub fn step(&mut self) -> PlanarResult<StepSummary> {
        let wall_start = Instant::now();
        let dt = self.config.dt;
        let gravity = Vec2::new(self.config.gravity[0], self.config.gravity[1]);

        self.telemetry.emit(StepEvent::new(
            self.step_count,
            EventKind::StepBegin {
                sim_time: self.sim_time,
                body_count: self.bodies.len() as u32,
            },
        ));

        // 1. Forces and gravity into velocity.
        for (_, body) in self.bodies.iter_mut() {
            body.integrate_forces(dt, gravity);
        }

        // 2. Narrow phase over every pair, in ascending slot order so
        //    the solve below visits arbiters deterministically.
        let handles: Vec<BodyHandle> = self.bodies.iter().map(|(h, _)| h).collect();
        let mut current: Vec<Arbiter> = Vec::new();
        let mut pairs_tested = 0u32;
        let mut contacts = 0u32;
        let mut max_penetration = 0.0f32;
        let mut carried = 0u32;

        for (i, &a) in handles.iter().enumerate() {
            for &b in &handles[i + 1..] {
                pairs_tested += 1;
                let detection = detect(&self.bodies, a, b)?;
                let Some(mut arbiter) = detection.arbiter else {
                    continue;
                };

                if let Some(previous) = self.arbiters.get(&detection.key) {
                    arbiter.carry_over(&mut self.bodies, previous)?;
                    carried += 1;
                }

                contacts += arbiter.contacts().len() as u32;
                for contact in arbiter.contacts() {
                    max_penetration = max_penetration.max(-contact.separation);
                }
                current.push(arbiter);
            }
        }

        let evicted = (self.arbiters.len() as u32).saturating_sub(carried);
        self.telemetry.emit(StepEvent::new(
            self.step_count,
            EventKind::NarrowPhase {
                pairs_tested,
                arbiters: current.len() as u32,
                contacts,
                max_penetration,
            },
        ));
        self.telemetry.emit(StepEvent::new(
            self.step_count,
            EventKind::WarmStart { carried, evicted },
        ));

        // 3. Solve.
        for arbiter in &mut current {
            arbiter.pre_step(&self.bodies, dt)?;
        }
        for _ in 0..self.config.iterations {
            for arbiter in &mut current {
                arbiter.solve_iteration(&mut self.bodies)?;
            }
        }
        self.telemetry.emit(StepEvent::new(
            self.step_count,
            EventKind::SolverPass {
                iterations: self.config.iterations,
            },
        ));

        // 4. Velocity into position.
        for (_, body) in self.bodies.iter_mut() {
            body.integrate_velocities(dt);
        }

        let kinetic_energy = self.kinetic_energy();
        self.telemetry.emit(StepEvent::new(
            self.step_count,
            EventKind::Energy {
                kinetic: kinetic_energy,
            },
        ));
        self.telemetry.emit(StepEvent::new(
            self.step_count,
            EventKind::StepEnd {
                wall_time: wall_start.elapsed().as_secs_f64(),
            },
        ));
        self.telemetry.flush();

        // 5. Persist this frame's arbiters for next frame's warm start.
        self.arbiters = current
            .iter()
            .map(|arb| (arb.key(), arb.clone()))
            .collect();

        self.step_count += 1;
        self.sim_time += dt as f64;

        Ok(StepSummary {
            pairs_tested,
            arbiters: current.len() as u32,
            contacts,
            max_penetration,
            carried,
            evicted,
            kinetic_energy,
        })
    }

    /// Total kinetic energy of the dynamic bodies, Σ ½mv² + ½Iω².
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .filter(|(_, b)| !b.is_fixed())
            .map(|(_, b)| {
                let mass = 1.0 / b.inv_mass() as f64;
                let inertia = 1.0 / b.inv_inertia() as f64;
                let v2 = b.velocity.length_squared() as f64;
                let w2 = (b.angular_velocity * b.angular_velocity) as f64;
                0.5 * mass * v2 + 0.5 * inertia * w2
            })
            .sum()
    }
}
