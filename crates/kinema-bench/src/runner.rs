//! Benchmark runner: executes scenarios with a solver and collects metrics.

use std::time::Instant;

use kinema_contact::{ContactDetector, Contacts, GroundPlaneDetector};
use kinema_debug::InspectionHook;
use kinema_math::Vec3;
use kinema_model::State;
use kinema_solver::{SemiImplicitSolver, SolverStrategy};
use kinema_types::KinemaResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario with the given solver.
    pub fn run(scenario: &Scenario, solver: &mut dyn SolverStrategy) -> KinemaResult<BenchmarkMetrics> {
        Self::run_with_hooks(scenario, solver, &mut [])
    }

    /// Run a single scenario, calling every hook around each step.
    pub fn run_with_hooks(
        scenario: &Scenario,
        solver: &mut dyn SolverStrategy,
        hooks: &mut [&mut dyn InspectionHook],
    ) -> KinemaResult<BenchmarkMetrics> {
        let model = &scenario.model;
        solver.precompute(model)?;

        let mut state_0 = model.state();
        let mut state_1 = model.state();
        let initial = kinematic_points(&state_0);

        let detector = GroundPlaneDetector::new();
        let mut contacts = Contacts::new();
        let mut contact_total: u64 = 0;

        let mut step_times = Vec::with_capacity(scenario.timesteps as usize);
        let mut plan_compilations = 0;
        let mut sim_time = 0.0f64;

        tracing::info!(
            scenario = scenario.kind.name(),
            solver = solver.name(),
            particles = model.particle_count(),
            bodies = model.body_count(),
            steps = scenario.timesteps,
            "Running scenario"
        );
        let total_start = Instant::now();

        for step in 0..scenario.timesteps as u64 {
            for hook in hooks.iter_mut() {
                hook.on_step_begin(step, sim_time, scenario.dt);
            }

            contacts.clear();
            if scenario.ground_contacts {
                detector.detect(model, &state_0, &mut contacts)?;
            }
            contact_total += (contacts.rigid_count() + contacts.soft_count()) as u64;

            let result = solver.step(
                model,
                &mut state_0,
                &mut state_1,
                None,
                Some(&contacts),
                scenario.dt,
            )?;
            std::mem::swap(&mut state_0, &mut state_1);
            sim_time += scenario.dt as f64;

            step_times.push(result.wall_time);
            if result.plan_rebuilt {
                plan_compilations += 1;
            }
            for hook in hooks.iter_mut() {
                hook.on_step_end(step, sim_time, model, &state_0, &result);
            }
        }
        for hook in hooks.iter_mut() {
            hook.on_simulation_end();
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();
        let points = kinematic_points(&state_0);
        let max_displacement = points
            .iter()
            .zip(&initial)
            .map(|(a, b)| a.distance(*b))
            .fold(0.0f32, f32::max);
        let min_height = if points.is_empty() {
            0.0
        } else {
            points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min)
        };
        let stable = points.iter().all(|p| p.is_finite())
            && state_0.particle_velocities.iter().all(|v| v.is_finite())
            && state_0.body_twists.iter().all(|t| t.linear.is_finite() && t.angular.is_finite());

        let steps = step_times.len();
        let avg_step_time = if steps == 0 {
            0.0
        } else {
            step_times.iter().sum::<f64>() / steps as f64
        };
        let min_step_time = if steps == 0 {
            0.0
        } else {
            step_times.iter().copied().fold(f64::MAX, f64::min)
        };
        let max_step_time = step_times.iter().copied().fold(0.0, f64::max);
        let avg_contacts = if steps == 0 {
            0.0
        } else {
            contact_total as f32 / steps as f32
        };

        let metrics = BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            solver: solver.name().to_string(),
            particle_count: model.particle_count(),
            body_count: model.body_count(),
            timesteps: scenario.timesteps,
            dt: scenario.dt,
            total_wall_time,
            avg_step_time,
            min_step_time,
            max_step_time,
            plan_compilations,
            avg_contacts,
            final_kinetic_energy: state_0.kinetic_energy(model),
            max_displacement,
            min_height,
            stable,
        };
        if !stable {
            tracing::warn!(scenario = %metrics.scenario, "Scenario diverged");
        }
        Ok(metrics)
    }

    /// Run a scenario with a fresh semi-implicit solver built from the
    /// scenario's own configuration.
    pub fn run_default(scenario: &Scenario) -> KinemaResult<BenchmarkMetrics> {
        let mut solver = SemiImplicitSolver::new(scenario.config.clone())?;
        Self::run(scenario, &mut solver)
    }

    /// Run every scenario with its tuned configuration.
    pub fn run_all() -> KinemaResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run_default(&Scenario::from_kind(kind)?))
            .collect()
    }
}

/// Particle positions followed by body origins.
fn kinematic_points(state: &State) -> Vec<Vec3> {
    state
        .particle_positions
        .iter()
        .copied()
        .chain(state.body_transforms.iter().map(|t| t.p))
        .collect()
}
