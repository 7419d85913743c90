//! Inspection hooks for live debugging.
//!
//! Hooks are called by whoever drives the stepping loop (the bench runner,
//! the CLI) and observe state without modifying it.

use kinema_math::Vec3;
use kinema_model::{Model, State};
use kinema_solver::StepResult;
use kinema_telemetry::{EventEmitter, EventKind, SimulationEvent};

use crate::snapshot::StateSnapshot;

/// Trait for simulation inspection hooks.
///
/// # Lifecycle
///
/// ```text
/// for each step:
///   hook.on_step_begin(...)
///   solver.step(...)
///   hook.on_step_end(...)       // sees the advanced state
/// hook.on_simulation_end()
/// ```
pub trait InspectionHook: Send {
    fn on_step_begin(&mut self, step: u64, sim_time: f64, dt: f32) {
        let _ = (step, sim_time, dt);
    }

    /// Called after the step with the advanced state.
    fn on_step_end(&mut self, step: u64, sim_time: f64, model: &Model, state: &State, result: &StepResult) {
        let _ = (step, sim_time, model, state, result);
    }

    fn on_simulation_end(&mut self) {}

    /// Returns the hook's name for logging.
    fn name(&self) -> &str;
}

/// Gravitational potential energy of particles and body centres of mass,
/// relative to the world origin.
pub fn gravitational_potential(model: &Model, state: &State) -> f64 {
    let g = model.gravity;
    let particles: f64 = state
        .particle_positions
        .iter()
        .zip(&model.particle_mass)
        .map(|(x, m)| -(*m as f64) * g.dot(*x) as f64)
        .sum();
    let bodies: f64 = (0..state.body_count())
        .map(|i| -(model.bodies[i].mass as f64) * g.dot(state.body_com(model, i)) as f64)
        .sum();
    particles + bodies
}

/// Translates step callbacks into telemetry events.
///
/// Events are buffered until drained, or emitted straight onto a bus when
/// the hook was built with [`TelemetryHook::with_emitter`].
#[derive(Default)]
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
    emitter: Option<EventEmitter>,
    compilations: u64,
}

impl TelemetryHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_emitter(emitter: EventEmitter) -> Self {
        Self {
            emitter: Some(emitter),
            ..Self::default()
        }
    }

    /// Drains buffered events.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    fn push(&mut self, event: SimulationEvent) {
        match &self.emitter {
            Some(emitter) => emitter.emit(event),
            None => self.events.push(event),
        }
    }
}

impl InspectionHook for TelemetryHook {
    fn on_step_begin(&mut self, step: u64, sim_time: f64, dt: f32) {
        self.push(SimulationEvent::new(step, EventKind::StepBegin { sim_time, dt }));
    }

    fn on_step_end(&mut self, step: u64, _sim_time: f64, model: &Model, state: &State, result: &StepResult) {
        if result.plan_rebuilt {
            self.compilations += 1;
            self.push(SimulationEvent::new(
                step,
                EventKind::PlanCompiled {
                    launches: result.launches as u32,
                    compilations: self.compilations,
                },
            ));
        }
        self.push(SimulationEvent::new(
            step,
            EventKind::StepEnd {
                wall_time: result.wall_time,
                launches: result.launches as u32,
            },
        ));
        self.push(SimulationEvent::new(
            step,
            EventKind::Energy {
                kinetic: state.kinetic_energy(model),
                potential: gravitational_potential(model, state),
            },
        ));
        let p: Vec3 = state.linear_momentum(model);
        self.push(SimulationEvent::new(step, EventKind::Momentum { linear: p.to_array() }));
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}

/// Captures a [`StateSnapshot`] every `interval` steps.
pub struct SnapshotHook {
    interval: u64,
    snapshots: Vec<StateSnapshot>,
}

impl SnapshotHook {
    /// An interval of zero is treated as one.
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            snapshots: Vec::new(),
        }
    }

    pub fn snapshots(&self) -> &[StateSnapshot] {
        &self.snapshots
    }

    pub fn take_snapshots(&mut self) -> Vec<StateSnapshot> {
        std::mem::take(&mut self.snapshots)
    }
}

impl InspectionHook for SnapshotHook {
    fn on_step_end(&mut self, step: u64, sim_time: f64, _model: &Model, state: &State, _result: &StepResult) {
        if step % self.interval == 0 {
            self.snapshots.push(StateSnapshot::capture(step, sim_time, state));
        }
    }

    fn on_simulation_end(&mut self) {
        tracing::debug!(count = self.snapshots.len(), "snapshots captured");
    }

    fn name(&self) -> &str {
        "snapshot_hook"
    }
}
