//! Contact record types.

use serde::{Deserialize, Serialize};

use kinema_math::Vec3;
use kinema_model::Model;
use kinema_types::{KinemaError, KinemaResult, ParticleId, ShapeId};

/// A contact between two shapes.
///
/// Points are expressed in the frame of the body owning each shape, or in
/// world coordinates for static shapes. The normal points from shape B
/// towards shape A.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidContact {
    pub shape_a: ShapeId,
    pub shape_b: ShapeId,
    pub point_a: Vec3,
    pub point_b: Vec3,
    /// World-space unit normal.
    pub normal: Vec3,
    /// Combined surface offset subtracted from the point separation.
    pub thickness: f32,
}

/// A contact between a particle and a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoftContact {
    pub particle: ParticleId,
    pub shape: ShapeId,
    /// Contact point in the frame of the body owning `shape`.
    pub body_point: Vec3,
    /// Surface velocity at the contact, in the same frame.
    pub body_velocity: Vec3,
    /// World-space unit normal pointing away from the shape.
    pub normal: Vec3,
}

/// Contact records for one step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contacts {
    pub rigid: Vec<RigidContact>,
    pub soft: Vec<SoftContact>,
}

impl Contacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rigid.clear();
        self.soft.clear();
    }

    pub fn rigid_count(&self) -> usize {
        self.rigid.len()
    }

    pub fn soft_count(&self) -> usize {
        self.soft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rigid.is_empty() && self.soft.is_empty()
    }

    /// Checks that every record refers to existing shapes and particles.
    pub fn validate(&self, model: &Model) -> KinemaResult<()> {
        let shapes = model.shape_count();
        let particles = model.particle_count();
        for (i, c) in self.rigid.iter().enumerate() {
            for shape in [c.shape_a, c.shape_b] {
                if shape.index() >= shapes {
                    return Err(KinemaError::InvalidTopology(format!(
                        "rigid contact {i} references shape {}, but shape count is {shapes}",
                        shape.0
                    )));
                }
            }
            if !c.normal.is_finite() || !c.point_a.is_finite() || !c.point_b.is_finite() {
                return Err(KinemaError::InvalidParameter(format!(
                    "rigid contact {i} has non-finite geometry"
                )));
            }
        }
        for (i, c) in self.soft.iter().enumerate() {
            if c.particle.index() >= particles {
                return Err(KinemaError::InvalidTopology(format!(
                    "soft contact {i} references particle {}, but particle count is {particles}",
                    c.particle.0
                )));
            }
            if c.shape.index() >= shapes {
                return Err(KinemaError::InvalidTopology(format!(
                    "soft contact {i} references shape {}, but shape count is {shapes}",
                    c.shape.0
                )));
            }
            if !c.normal.is_finite() || !c.body_point.is_finite() || !c.body_velocity.is_finite() {
                return Err(KinemaError::InvalidParameter(format!(
                    "soft contact {i} has non-finite geometry"
                )));
            }
        }
        Ok(())
    }
}
