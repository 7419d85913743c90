//! Solver strategy trait: the core abstraction for time integration.
//!
//! Every integrator implements this trait, so scenario runners and the
//! CLI can drive any solver through `&mut dyn SolverStrategy`.

use kinema_contact::Contacts;
use kinema_model::{Control, Model, State};
use kinema_types::{KinemaResult, ModelUpdateFlags};

/// Result of a solver step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// Number of kernel launches replayed from the plan.
    pub launches: usize,
    /// Whether the execution plan was (re)compiled for this step.
    pub plan_rebuilt: bool,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Trait for time integration solvers.
///
/// Callers own a pair of states and swap them after each step:
///
/// ```text
/// solver.precompute(&model)?;
/// loop {
///     detector.detect(&model, &state_0, &mut contacts)?;
///     solver.step(&model, &mut state_0, &mut state_1, Some(&control), Some(&contacts), dt)?;
///     std::mem::swap(&mut state_0, &mut state_1);
/// }
/// ```
///
/// # Implementations
///
/// - [`SemiImplicitSolver`](crate::SemiImplicitSolver): Explicit force accumulation
///   with symplectic Euler integration
pub trait SolverStrategy: Send {
    /// Advance the simulation by `dt`.
    ///
    /// Reads positions and velocities from `state_in`, uses its force
    /// accumulators as scratch, and writes the result into `state_out`.
    /// All inputs are validated before `state_out` is touched, so an error
    /// leaves it unchanged.
    fn step(
        &mut self,
        model: &Model,
        state_in: &mut State,
        state_out: &mut State,
        control: Option<&Control>,
        contacts: Option<&Contacts>,
        dt: f32,
    ) -> KinemaResult<StepResult>;

    /// Inform the solver that the given model categories changed.
    fn notify_model_update(&mut self, model: &Model, flags: ModelUpdateFlags);

    /// Build derived data ahead of the first step.
    fn precompute(&mut self, model: &Model) -> KinemaResult<()>;

    /// Returns the solver name.
    fn name(&self) -> &str;
}
