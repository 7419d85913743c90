//! Event bus with pluggable sinks.
//!
//! Producers hold a cheap [`EventEmitter`] handle (or call [`EventBus::emit`]
//! directly); events queue on a `std::sync::mpsc` channel until the owner
//! calls [`EventBus::flush`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

/// Broadcast event bus for simulation telemetry.
pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Shared with emitters so disabling the bus silences them too.
    enabled: Arc<AtomicBool>,
    dispatched: u64,
}

/// Sending half of an [`EventBus`], usable from other threads.
#[derive(Clone)]
pub struct EventEmitter {
    sender: mpsc::Sender<SimulationEvent>,
    enabled: Arc<AtomicBool>,
}

impl EventEmitter {
    /// Queue an event. Dropped silently when the bus is disabled or gone.
    pub fn emit(&self, event: SimulationEvent) {
        if self.enabled.load(Ordering::Relaxed) {
            let _ = self.sender.send(event);
        }
    }
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: Arc::new(AtomicBool::new(true)),
            dispatched: 0,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        tracing::debug!(sink = sink.name(), "telemetry sink registered");
        self.sinks.push(sink);
    }

    /// A sending handle for producers that do not own the bus.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            sender: self.sender.clone(),
            enabled: Arc::clone(&self.enabled),
        }
    }

    /// Enables or disables the bus. A disabled bus drops events silently.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Emit an event. No-op when the bus is disabled.
    pub fn emit(&self, event: SimulationEvent) {
        if self.is_enabled() {
            let _ = self.sender.send(event);
        }
    }

    /// Deliver every queued event to every sink, in emission order.
    ///
    /// Returns the number of events delivered by this call.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            delivered += 1;
        }
        self.dispatched += delivered as u64;
        delivered
    }

    /// Flush pending events and finalize every sink.
    pub fn shutdown(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
        tracing::debug!(events = self.dispatched, "telemetry bus shut down");
    }

    /// Total events delivered since creation.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
