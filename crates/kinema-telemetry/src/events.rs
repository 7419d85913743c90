//! Simulation event types.
//!
//! Events are lightweight value types tagged with the step index. They
//! serialize with serde so sinks can write them as JSON lines.

use serde::{Deserialize, Serialize};

/// A simulation event emitted around a solver step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Step number (0-indexed).
    pub step: u64,
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A step is about to run.
    StepBegin {
        /// Simulation time at the start of the step (seconds).
        sim_time: f64,
        dt: f32,
    },

    /// A step completed.
    StepEnd {
        /// Wall-clock time spent in the solver (seconds).
        wall_time: f64,
        /// Kernel launches replayed.
        launches: u32,
    },

    /// The solver compiled a new execution plan.
    PlanCompiled {
        launches: u32,
        /// Plans compiled since the solver was created.
        compilations: u64,
    },

    /// Energy snapshot of the current state.
    Energy {
        kinetic: f64,
        /// Gravitational potential relative to the origin.
        potential: f64,
    },

    /// Total linear momentum of particles and bodies.
    Momentum { linear: [f32; 3] },

    /// Contact detection result.
    Contacts {
        rigid: u32,
        soft: u32,
        /// Deepest penetration found (meters, non-negative).
        max_penetration: f32,
    },

    /// Free-form event.
    Custom {
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    pub fn new(step: u64, kind: EventKind) -> Self {
        Self { step, kind }
    }

    /// Short label of the payload variant.
    pub fn label(&self) -> &str {
        match &self.kind {
            EventKind::StepBegin { .. } => "step_begin",
            EventKind::StepEnd { .. } => "step_end",
            EventKind::PlanCompiled { .. } => "plan_compiled",
            EventKind::Energy { .. } => "energy",
            EventKind::Momentum { .. } => "momentum",
            EventKind::Contacts { .. } => "contacts",
            EventKind::Custom { label, .. } => label,
        }
    }

    /// Single-line JSON rendering, as written by file sinks.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
