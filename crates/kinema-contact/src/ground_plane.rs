//! Ground plane contact generation.
//!
//! Generates contacts against every static [`ShapeGeometry::Plane`]
//! shape: soft contacts for particles and rigid contacts for spheres,
//! capsules and box corners.

use kinema_math::{Transform, Vec3};
use kinema_model::{Model, ShapeGeometry, State};
use kinema_types::{KinemaResult, ParticleId, ShapeId};

use crate::contact::{Contacts, RigidContact, SoftContact};
use crate::detector::ContactDetector;

/// Detector for static planes.
#[derive(Debug, Clone, Default)]
pub struct GroundPlaneDetector {
    /// Skip particle contacts.
    pub skip_particles: bool,
    /// Skip body contacts.
    pub skip_bodies: bool,
}

impl GroundPlaneDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A static plane in world space.
#[derive(Debug, Clone, Copy)]
struct Plane {
    shape: ShapeId,
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    #[inline]
    fn distance(&self, x: Vec3) -> f32 {
        self.normal.dot(x - self.point)
    }

    #[inline]
    fn project(&self, x: Vec3) -> Vec3 {
        x - self.normal * self.distance(x)
    }
}

impl ContactDetector for GroundPlaneDetector {
    fn detect(&self, model: &Model, state: &State, contacts: &mut Contacts) -> KinemaResult<()> {
        let planes: Vec<Plane> = model
            .shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.body.is_none() && matches!(s.geometry, ShapeGeometry::Plane))
            .map(|(i, s)| Plane {
                shape: ShapeId(i as u32),
                point: s.transform.p,
                normal: s.transform.transform_vector(Vec3::Y),
            })
            .collect();
        if planes.is_empty() {
            return Ok(());
        }

        let soft_before = contacts.soft.len();
        let rigid_before = contacts.rigid.len();

        for plane in &planes {
            if !self.skip_particles {
                detect_particles(model, state, plane, contacts);
            }
            if !self.skip_bodies {
                detect_bodies(model, state, plane, contacts);
            }
        }

        tracing::trace!(
            soft = contacts.soft.len() - soft_before,
            rigid = contacts.rigid.len() - rigid_before,
            "Ground plane contacts"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "ground_plane"
    }
}

fn detect_particles(model: &Model, state: &State, plane: &Plane, contacts: &mut Contacts) {
    let margin = model.soft_contact.margin;
    for (i, &x) in state.particle_positions.iter().enumerate() {
        if !model.particle_flags[i].is_active() {
            continue;
        }
        if plane.distance(x) - model.particle_radius[i] < margin {
            contacts.soft.push(SoftContact {
                particle: ParticleId(i as u32),
                shape: plane.shape,
                body_point: plane.project(x),
                body_velocity: Vec3::ZERO,
                normal: plane.normal,
            });
        }
    }
}

fn detect_bodies(model: &Model, state: &State, plane: &Plane, contacts: &mut Contacts) {
    let margin = model.rigid_contact_margin;
    for (s, shape) in model.shapes.iter().enumerate() {
        let Some(body) = shape.body else {
            continue;
        };
        let body_xform = state.body_transforms[body.index()];
        let world = body_xform * shape.transform;

        // (point in shape frame, surface offset)
        let mut candidates: Vec<(Vec3, f32)> = Vec::new();
        match shape.geometry {
            ShapeGeometry::Sphere { radius } => candidates.push((Vec3::ZERO, radius)),
            ShapeGeometry::Capsule {
                radius,
                half_height,
            } => {
                candidates.push((Vec3::Y * half_height, radius));
                candidates.push((-Vec3::Y * half_height, radius));
            }
            ShapeGeometry::Box { half_extents: h } => {
                for sx in [-1.0, 1.0] {
                    for sy in [-1.0, 1.0] {
                        for sz in [-1.0, 1.0] {
                            candidates.push((Vec3::new(sx * h.x, sy * h.y, sz * h.z), 0.0));
                        }
                    }
                }
            }
            ShapeGeometry::Plane => {}
        }

        for (local, thickness) in candidates {
            let x = world.transform_point(local);
            if plane.distance(x) - thickness < margin {
                contacts.rigid.push(RigidContact {
                    shape_a: ShapeId(s as u32),
                    shape_b: plane.shape,
                    point_a: body_local(&body_xform, x),
                    point_b: plane.project(x),
                    normal: plane.normal,
                    thickness,
                });
            }
        }
    }
}

#[inline]
fn body_local(body: &Transform, x: Vec3) -> Vec3 {
    body.inverse().transform_point(x)
}
