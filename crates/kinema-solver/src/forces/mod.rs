//! Force evaluators.
//!
//! Each evaluator is a kernel `fn eval(&ForceContext, tid)` launched over
//! one index domain. Kernels read positions and velocities from the input
//! state and scatter additively into its accumulators. They never read an
//! accumulator and never mutate the model.

pub mod bending;
pub mod body_contact;
pub mod joint;
pub mod muscle;
pub mod particle;
pub mod particle_body_contact;
pub mod spring;
pub mod tetrahedral;
pub mod triangle;
pub mod triangle_contact;

use kinema_contact::Contacts;
use kinema_math::{Vec3, Wrench};
use kinema_model::{Control, Model, State};

use crate::config::{BodyForceFrame, SemiImplicitConfig};
use crate::grid::ParticleGrid;

/// Shape data derived once per model and refreshed on shape updates.
#[derive(Debug, Clone, Default)]
pub struct ShapeLayout {
    /// Owning body of each shape, `None` for static shapes.
    pub body: Vec<Option<usize>>,
}

impl ShapeLayout {
    pub fn build(model: &Model) -> Self {
        Self {
            body: model.shapes.iter().map(|s| s.body.map(|b| b.index())).collect(),
        }
    }
}

/// Joint data derived once per model and refreshed on joint updates.
#[derive(Debug, Clone, Default)]
pub struct JointLayout {
    /// Index of each joint's first entry in the per-axis control arrays.
    pub axis_start: Vec<usize>,
    pub axis_count: usize,
}

impl JointLayout {
    pub fn build(model: &Model) -> Self {
        let mut axis_start = Vec::with_capacity(model.joint_count());
        let mut next = 0;
        for joint in &model.joints {
            axis_start.push(next);
            next += joint.kind.axis_count();
        }
        Self {
            axis_start,
            axis_count: next,
        }
    }
}

/// Read-only inputs shared by every kernel in one step.
pub struct ForceContext<'a> {
    pub model: &'a Model,
    pub state: &'a State,
    /// Caller control or the solver's neutral control.
    pub control: &'a Control,
    /// False when the caller passed no control; drive targets are then off.
    pub has_control: bool,
    pub contacts: &'a Contacts,
    pub config: &'a SemiImplicitConfig,
    pub joints: &'a JointLayout,
    pub shapes: &'a ShapeLayout,
    pub grid: &'a ParticleGrid,
}

impl ForceContext<'_> {
    /// World-space centre of mass of body `b`.
    #[inline]
    pub fn body_com(&self, b: usize) -> Vec3 {
        self.state.body_com(self.model, b)
    }

    /// Wrench of `force` applied at world `point` plus a pure `torque`,
    /// expressed in the configured body force frame.
    #[inline]
    pub fn body_wrench(&self, b: usize, point: Vec3, force: Vec3, torque: Vec3) -> Wrench {
        let lever = match self.config.body_force_frame {
            BodyForceFrame::CenterOfMass => point - self.body_com(b),
            BodyForceFrame::WorldOrigin => point,
        };
        Wrench::new(torque + lever.cross(force), force)
    }

    /// Map a body-local point to world space. Static points pass through.
    #[inline]
    pub fn world_point(&self, body: Option<usize>, local: Vec3) -> Vec3 {
        match body {
            Some(b) => self.state.body_transforms[b].transform_point(local),
            None => local,
        }
    }

    /// Velocity of the material point at world `x` on `body`.
    #[inline]
    pub fn point_velocity(&self, body: Option<usize>, x: Vec3) -> Vec3 {
        match body {
            Some(b) => self.state.body_twists[b].point_velocity(x - self.body_com(b)),
            None => Vec3::ZERO,
        }
    }
}
