//! # kinema-solver
//!
//! Time integration for the Kinema engine.
//!
//! One step runs three phases in a fixed order: the force accumulators of
//! the input state are cleared, every enabled force evaluator scatters into
//! them, and the integrator writes the advanced positions and velocities
//! into the output state.
//!
//! ## Key Types
//!
//! - [`SolverStrategy`]: Trait for swappable time integrators
//! - [`SemiImplicitSolver`]: Symplectic (semi-implicit) Euler with penalty forces
//! - [`SemiImplicitConfig`]: Coefficients, backend and evaluator selection
//! - [`StepPlan`]: Ordered launch list compiled from a [`Layout`]
//! - [`ParticleGrid`]: Uniform hash grid for particle neighbour queries

pub mod config;
pub mod forces;
pub mod grid;
pub mod integrate;
pub mod plan;
pub mod semi_implicit;
pub mod strategy;

pub use config::{BodyForceFrame, EvaluatorSet, FemModel, SemiImplicitConfig};
pub use grid::ParticleGrid;
pub use plan::{Launch, Layout, Pass, StepPlan};
pub use semi_implicit::SemiImplicitSolver;
pub use strategy::{SolverStrategy, StepResult};
