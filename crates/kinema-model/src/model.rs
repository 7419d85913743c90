//! The static simulation model.
//!
//! A [`Model`] holds everything that does not change during a step:
//! particle mass properties, element topology with rest-state data,
//! rigid bodies, joints, shapes and global contact coefficients.
//! Build one with [`ModelBuilder`](crate::ModelBuilder).

use kinema_math::Vec3;
use kinema_types::{KinemaError, KinemaResult, ParticleFlags};

use crate::control::Control;
use crate::elements::{
    BendingEdge, Body, Joint, Muscle, ParticleContactParams, Shape, SoftContactParams, Spring,
    Tetrahedron, Triangle, TriangleContactParams,
};
use crate::state::State;

/// Immutable-during-step description of a simulation.
///
/// Fields are public so callers can tune coefficients between steps.
/// After changing body, joint or shape data, call
/// `SolverStrategy::notify_model_update` with the matching flags.
#[derive(Debug, Clone)]
pub struct Model {
    // ─── Particles ───
    pub particle_positions: Vec<Vec3>,
    pub particle_velocities: Vec<Vec3>,
    pub particle_mass: Vec<f32>,
    pub particle_inv_mass: Vec<f32>,
    pub particle_radius: Vec<f32>,
    pub particle_flags: Vec<ParticleFlags>,
    /// Largest particle radius; zero disables particle–particle contact.
    pub particle_max_radius: f32,
    /// Integrated particle speed is clamped to this value.
    pub particle_max_velocity: f32,
    pub particle_contact: ParticleContactParams,

    // ─── Elements ───
    pub springs: Vec<Spring>,
    pub triangles: Vec<Triangle>,
    pub bending_edges: Vec<BendingEdge>,
    pub tetrahedra: Vec<Tetrahedron>,

    // ─── Rigid bodies ───
    pub bodies: Vec<Body>,
    pub joints: Vec<Joint>,
    pub shapes: Vec<Shape>,
    pub muscles: Vec<Muscle>,

    // ─── Contact ───
    pub soft_contact: SoftContactParams,
    pub rigid_contact_margin: f32,
    pub triangle_contact: TriangleContactParams,

    pub gravity: Vec3,
}

impl Model {
    pub fn particle_count(&self) -> usize {
        self.particle_positions.len()
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn bending_edge_count(&self) -> usize {
        self.bending_edges.len()
    }

    pub fn tetrahedron_count(&self) -> usize {
        self.tetrahedra.len()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Total number of driven joint axes (length of the joint control arrays).
    pub fn joint_axis_count(&self) -> usize {
        self.joints.iter().map(|j| j.kind.axis_count()).sum()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn muscle_count(&self) -> usize {
        self.muscles.len()
    }

    /// Marks particle `i` as simulated or kinematic.
    pub fn set_particle_active(&mut self, i: usize, active: bool) -> KinemaResult<()> {
        let n = self.particle_flags.len();
        let flags = self.particle_flags.get_mut(i).ok_or_else(|| {
            KinemaError::InvalidParameter(format!("particle {i} out of range ({n} particles)"))
        })?;
        flags.set(ParticleFlags::ACTIVE, active);
        Ok(())
    }

    /// Creates a state initialised from the model's initial conditions.
    pub fn state(&self) -> State {
        State::from_model(self)
    }

    /// Creates a neutral control sized for this model.
    pub fn control(&self) -> Control {
        Control::zeros(self)
    }

    /// Validates index consistency of every element.
    ///
    /// Checks:
    /// - All per-particle arrays have the same length
    /// - Element indices are within bounds
    /// - Body references of joints, shapes and muscles exist
    pub fn validate(&self) -> KinemaResult<()> {
        let n = self.particle_positions.len();
        let per_particle = [
            ("particle_velocities", self.particle_velocities.len()),
            ("particle_mass", self.particle_mass.len()),
            ("particle_inv_mass", self.particle_inv_mass.len()),
            ("particle_radius", self.particle_radius.len()),
            ("particle_flags", self.particle_flags.len()),
        ];
        for (name, len) in per_particle {
            if len != n {
                return Err(KinemaError::InvalidTopology(format!(
                    "{name} length ({len}) != particle count ({n})"
                )));
            }
        }

        let check = |kind: &str, element: usize, indices: &[u32]| -> KinemaResult<()> {
            for &idx in indices {
                if idx as usize >= n {
                    return Err(KinemaError::InvalidTopology(format!(
                        "{kind} {element} references particle {idx}, but particle count is {n}"
                    )));
                }
            }
            Ok(())
        };
        for (i, s) in self.springs.iter().enumerate() {
            check("spring", i, &s.indices)?;
        }
        for (i, t) in self.triangles.iter().enumerate() {
            check("triangle", i, &t.indices)?;
        }
        for (i, e) in self.bending_edges.iter().enumerate() {
            check("bending edge", i, &e.indices)?;
        }
        for (i, t) in self.tetrahedra.iter().enumerate() {
            check("tetrahedron", i, &t.indices)?;
        }

        let bodies = self.bodies.len();
        let check_body = |kind: &str, element: usize, body: usize| -> KinemaResult<()> {
            if body >= bodies {
                return Err(KinemaError::InvalidTopology(format!(
                    "{kind} {element} references body {body}, but body count is {bodies}"
                )));
            }
            Ok(())
        };
        for (i, j) in self.joints.iter().enumerate() {
            check_body("joint", i, j.child.index())?;
            if let Some(parent) = j.parent {
                check_body("joint", i, parent.index())?;
                if parent == j.child {
                    return Err(KinemaError::InvalidTopology(format!(
                        "joint {i} connects body {} to itself",
                        parent.0
                    )));
                }
            }
        }
        for (i, s) in self.shapes.iter().enumerate() {
            if let Some(body) = s.body {
                check_body("shape", i, body.index())?;
            }
        }
        for (i, m) in self.muscles.iter().enumerate() {
            for w in &m.waypoints {
                check_body("muscle", i, w.body.index())?;
            }
        }

        Ok(())
    }
}
