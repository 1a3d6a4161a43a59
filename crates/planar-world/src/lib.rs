//! # planar-world
//!
//! The stepping loop that ties the engine together: a body arena,
//! gravity, all-pairs narrow-phase detection, warm-started arbiter
//! persistence keyed by [`planar_types::PairKey`], the sequential
//! impulse solve, and velocity integration — plus the TOML-backed
//! scene configuration.

pub mod config;
pub mod world;

pub use config::WorldConfig;
pub use world::{StepSummary, World};
