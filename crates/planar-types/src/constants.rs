//! Physical constants and simulation defaults.

use crate::scalar::Scalar;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: Scalar = 9.81;

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: Scalar = 1.0 / 60.0;

/// Default number of sequential-impulse iterations per timestep.
pub const DEFAULT_SOLVER_ITERATIONS: u32 = 10;

/// Penetration depth tolerated without position correction (meters).
///
/// Resting contacts are allowed to overlap by this much; correcting
/// all the way to zero makes stacked bodies jitter.
pub const ALLOWED_PENETRATION: Scalar = 0.01;

/// Fraction of the remaining penetration corrected per step (Baumgarte).
///
/// Values near 1.0 are unstable, values near 0.0 correct too slowly.
pub const BIAS_FACTOR: Scalar = 0.2;

/// Normal-velocity reflection factor used by the penalty coupling.
pub const PENALTY_RESTITUTION: Scalar = 0.1;

/// Epsilon for degenerate-edge detection and normalization guards.
pub const EPSILON: Scalar = 1.0e-7;
