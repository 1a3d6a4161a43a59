//! Simulation event types.
//!
//! Lightweight value types emitted by the world at fixed points in
//! each step. They carry just enough data to monitor contact counts,
//! penetration depth, and solver effort without touching engine state.

use serde::{Deserialize, Serialize};

/// An event emitted by the stepping loop, tagged with its step index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepEvent {
    /// Step number (0-indexed).
    pub step: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// A step started.
    StepBegin {
        /// Accumulated simulation time at the start of the step (seconds).
        sim_time: f64,
        /// Number of live bodies.
        body_count: u32,
    },

    /// A step finished.
    StepEnd {
        /// Wall-clock duration of the step (seconds).
        wall_time: f64,
    },

    /// Narrow phase finished for the step.
    NarrowPhase {
        /// Candidate pairs tested (all-pairs, no broad phase).
        pairs_tested: u32,
        /// Arbiters with at least one contact.
        arbiters: u32,
        /// Total retained contact points.
        contacts: u32,
        /// Deepest penetration among retained contacts (meters, >= 0).
        max_penetration: f32,
    },

    /// Warm-start carryover finished.
    WarmStart {
        /// Arbiters that inherited impulses from the previous step.
        carried: u32,
        /// Cached arbiters evicted (pair gone or body removed).
        evicted: u32,
    },

    /// The impulse solver finished its passes for the step.
    SolverPass {
        /// Iterations executed.
        iterations: u32,
    },

    /// Kinetic energy snapshot after integration.
    Energy {
        /// Σ ½ m v² + ½ I ω² over dynamic bodies.
        kinetic: f64,
    },
}

impl StepEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u64, kind: EventKind) -> Self {
        Self { step, kind }
    }
}
