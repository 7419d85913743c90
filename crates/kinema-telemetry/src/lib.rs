//! # kinema-telemetry
//!
//! Event bus for simulation telemetry. Steps, plan compilations, model
//! notifications, energy and momentum readings are emitted as structured
//! events and fanned out to pluggable sinks.
//!
//! ## Key Types
//!
//! - [`EventBus`]: Channel-backed dispatcher with registered sinks
//! - [`SimulationEvent`]: Step-tagged event with an [`EventKind`] payload
//! - [`EventSink`]: Consumer trait ([`VecSink`], [`TracingSink`])

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::{EventBus, EventEmitter};
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
