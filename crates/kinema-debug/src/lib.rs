//! # kinema-debug
//!
//! Inspection hooks and state snapshots for debugging simulations.
//! Snapshots serialize the kinematic part of a [`State`](kinema_model::State)
//! to bincode for replay; hooks observe a stepping loop without touching
//! the solver.
//!
//! ## Key Types
//!
//! - [`StateSnapshot`]: Positions and velocities of one step, bincode-encoded
//! - [`InspectionHook`]: Callbacks around each solver step
//! - [`TelemetryHook`]: Turns step callbacks into telemetry events
//! - [`SnapshotHook`]: Records a snapshot every N steps

pub mod hooks;
pub mod snapshot;

pub use hooks::{gravitational_potential, InspectionHook, SnapshotHook, TelemetryHook};
pub use snapshot::StateSnapshot;
