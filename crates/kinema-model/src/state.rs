//! Simulation state: the mutable per-step data.
//!
//! Callers own two states and swap them after every step. The solver
//! reads positions and velocities from the input state, accumulates
//! forces into its accumulators and writes the integrated result into
//! the output state.

use kinema_math::{Mat3, Transform, Twist, Vec3};
use kinema_parallel::{Vec3Accumulator, WrenchAccumulator};
use kinema_types::{KinemaError, KinemaResult};

use crate::model::Model;

/// Mutable per-step simulation data.
#[derive(Debug, Clone)]
pub struct State {
    // ─── Particles ───
    pub particle_positions: Vec<Vec3>,
    pub particle_velocities: Vec<Vec3>,
    /// Zeroed at the start of every step; evaluators only add.
    pub particle_forces: Vec3Accumulator,

    // ─── Bodies ───
    /// Pose of each body origin.
    pub body_transforms: Vec<Transform>,
    /// Centre-of-mass velocity and world angular velocity.
    pub body_twists: Vec<Twist>,
    /// Zeroed at the start of every step; evaluators only add.
    pub body_wrenches: WrenchAccumulator,
}

impl State {
    /// Initialize from the model's initial conditions.
    pub fn from_model(model: &Model) -> Self {
        Self {
            particle_positions: model.particle_positions.clone(),
            particle_velocities: model.particle_velocities.clone(),
            particle_forces: Vec3Accumulator::zeros(model.particle_count()),
            body_transforms: model.bodies.iter().map(|b| b.transform).collect(),
            body_twists: model
                .bodies
                .iter()
                .map(|b| Twist::new(b.angular_velocity, b.linear_velocity))
                .collect(),
            body_wrenches: WrenchAccumulator::zeros(model.body_count()),
        }
    }

    pub fn particle_count(&self) -> usize {
        self.particle_positions.len()
    }

    pub fn body_count(&self) -> usize {
        self.body_transforms.len()
    }

    /// Zero both accumulators.
    pub fn clear_forces(&mut self) {
        self.particle_forces.clear();
        self.body_wrenches.clear();
    }

    /// Checks that every array is sized for `model`.
    pub fn check_layout(&self, model: &Model) -> KinemaResult<()> {
        let np = model.particle_count();
        let nb = model.body_count();
        let sizes = [
            ("particle_positions", self.particle_positions.len(), np),
            ("particle_velocities", self.particle_velocities.len(), np),
            ("particle_forces", self.particle_forces.len(), np),
            ("body_transforms", self.body_transforms.len(), nb),
            ("body_twists", self.body_twists.len(), nb),
            ("body_wrenches", self.body_wrenches.len(), nb),
        ];
        for (name, got, want) in sizes {
            if got != want {
                return Err(KinemaError::StateMismatch(format!(
                    "state {name} has {got} entries, model expects {want}"
                )));
            }
        }
        Ok(())
    }

    /// World-space centre of mass of body `i`.
    #[inline]
    pub fn body_com(&self, model: &Model, i: usize) -> Vec3 {
        self.body_transforms[i].transform_point(model.bodies[i].com)
    }

    /// Total linear momentum of all particles.
    pub fn particle_momentum(&self, model: &Model) -> Vec3 {
        self.particle_velocities
            .iter()
            .zip(&model.particle_mass)
            .map(|(v, m)| *v * *m)
            .sum()
    }

    /// Total linear momentum of all bodies.
    pub fn body_momentum(&self, model: &Model) -> Vec3 {
        self.body_twists
            .iter()
            .zip(&model.bodies)
            .map(|(t, b)| t.linear * b.mass)
            .sum()
    }

    /// Combined linear momentum of particles and bodies.
    pub fn linear_momentum(&self, model: &Model) -> Vec3 {
        self.particle_momentum(model) + self.body_momentum(model)
    }

    /// Total kinetic energy (translational + rotational).
    pub fn kinetic_energy(&self, model: &Model) -> f64 {
        let particles: f64 = self
            .particle_velocities
            .iter()
            .zip(&model.particle_mass)
            .map(|(v, m)| 0.5 * *m as f64 * v.length_squared() as f64)
            .sum();

        let bodies: f64 = self
            .body_twists
            .iter()
            .zip(&self.body_transforms)
            .zip(&model.bodies)
            .map(|((twist, xform), body)| {
                let r = Mat3::from_quat(xform.q);
                let inertia_world = r * body.inertia * r.transpose();
                let w = twist.angular;
                let rot = 0.5 * w.dot(inertia_world * w) as f64;
                let lin = 0.5 * body.mass as f64 * twist.linear.length_squared() as f64;
                rot + lin
            })
            .sum();

        particles + bodies
    }
}
