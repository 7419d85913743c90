//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use crate::events::SimulationEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the bus shuts down.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events into a shared `Vec`.
///
/// Clones share the same storage, so a test can keep one clone and hand
/// the other to the bus.
#[derive(Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(events) => events.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Logs events through `tracing` at the configured level.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::DEBUG)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let label = event.label();
        let (step, kind) = (event.step, &event.kind);
        if self.level == tracing::Level::ERROR {
            tracing::error!(step, label, event = ?kind, "simulation_event");
        } else if self.level == tracing::Level::WARN {
            tracing::warn!(step, label, event = ?kind, "simulation_event");
        } else if self.level == tracing::Level::INFO {
            tracing::info!(step, label, event = ?kind, "simulation_event");
        } else if self.level == tracing::Level::DEBUG {
            tracing::debug!(step, label, event = ?kind, "simulation_event");
        } else {
            tracing::trace!(step, label, event = ?kind, "simulation_event");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
