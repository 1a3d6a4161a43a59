//! # planar-telemetry
//!
//! Structured telemetry for the stepping loop. The world emits events
//! (timing, narrow-phase counts, solver passes, energy) into a bus;
//! pluggable sinks consume them on flush (test capture, `tracing`
//! output).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::TelemetryBus;
pub use events::{EventKind, StepEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
