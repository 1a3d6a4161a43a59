//! World configuration.
//!
//! Parameters that control the stepping loop: timestep, solver
//! iteration count, gravity. Loaded from TOML for the CLI and
//! validated before a world accepts them.

use planar_types::constants::{DEFAULT_DT, DEFAULT_SOLVER_ITERATIONS, GRAVITY};
use planar_types::{PlanarError, PlanarResult};
use serde::{Deserialize, Serialize};

/// Configuration for the simulation world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Fixed timestep in seconds.
    pub dt: f32,

    /// Solver iterations per step (projected Gauss-Seidel passes).
    pub iterations: u32,

    /// Gravity vector [gx, gy] in m/s².
    pub gravity: [f32; 2],
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            iterations: DEFAULT_SOLVER_ITERATIONS,
            gravity: [0.0, -GRAVITY],
        }
    }
}

impl WorldConfig {
    /// Checks the configuration for values the stepping loop cannot use.
    pub fn validate(&self) -> PlanarResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(PlanarError::InvalidConfig(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        if self.iterations == 0 {
            return Err(PlanarError::InvalidConfig(
                "iterations must be at least 1".into(),
            ));
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(PlanarError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        Ok(())
    }

    /// Parses and validates a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> PlanarResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| PlanarError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to a TOML string.
    pub fn to_toml_string(&self) -> PlanarResult<String> {
        toml::to_string_pretty(self).map_err(|e| PlanarError::Serialization(e.to_string()))
    }

    /// Creates a config for quick debugging runs (fewer iterations).
    pub fn debug() -> Self {
        Self {
            iterations: 3,
            ..Default::default()
        }
    }

    /// Creates a high-quality config (more iterations).
    pub fn high_quality() -> Self {
        Self {
            iterations: 30,
            ..Default::default()
        }
    }
}
