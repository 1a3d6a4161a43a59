//! Telemetry bus — buffered event dispatch with pluggable sinks.
//!
//! The stepping loop is single-threaded, so events accumulate in a
//! plain `Vec` buffer and are handed to every registered sink when
//! `flush` is called at the end of a step.

use crate::events::StepEvent;
use crate::sinks::EventSink;

/// Buffered event bus for simulation telemetry.
///
/// `emit` appends to an internal buffer; `flush` drains the buffer
/// through all registered sinks in registration order.
pub struct TelemetryBus {
    /// Events emitted since the last flush.
    buffer: Vec<StepEvent>,
    /// Registered sinks.
    sinks: Vec<Box<dyn EventSink>>,
    /// Whether the bus is active. A disabled bus drops events silently.
    enabled: bool,
}

impl TelemetryBus {
    /// Creates a new bus with no sinks.
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus. Disabled bus drops events silently.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the bus is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emit an event. If the bus is disabled, this is a no-op.
    pub fn emit(&mut self, event: StepEvent) {
        if !self.enabled {
            return;
        }
        self.buffer.push(event);
    }

    /// Flush all buffered events to registered sinks.
    ///
    /// Call this at the end of each step or at shutdown.
    pub fn flush(&mut self) {
        for event in self.buffer.drain(..) {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
        }
    }

    /// Flushes remaining events and finalizes every sink.
    pub fn shutdown(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Returns the number of events awaiting flush.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

impl Default for TelemetryBus {
    fn default() -> Self {
        Self::new()
    }
}
