//! Bitmask flags shared between the model and the solver.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Per-particle state bits stored in the model.
    ///
    /// A particle without [`ACTIVE`](ParticleFlags::ACTIVE) is kinematic:
    /// forces may still reference it, but the integrator copies its
    /// position and velocity through unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ParticleFlags: u32 {
        /// Particle is advanced by the integrator.
        const ACTIVE = 1 << 0;
    }
}

impl Default for ParticleFlags {
    fn default() -> Self {
        Self::ACTIVE
    }
}

impl ParticleFlags {
    /// Returns true if the integrator should advance this particle.
    #[inline]
    pub fn is_active(self) -> bool {
        self.contains(Self::ACTIVE)
    }
}

bitflags::bitflags! {
    /// Categories of model arrays that changed after solver construction.
    ///
    /// Passed to `SolverStrategy::notify_model_update`. Each bit covers a
    /// disjoint group of model arrays.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ModelUpdateFlags: u32 {
        /// Joint frames and joint kinds.
        const JOINT_PROPERTIES = 1 << 0;
        /// Joint axis, target mode, target gains and limits.
        const JOINT_AXIS_PROPERTIES = 1 << 1;
        /// Per-degree-of-freedom properties (armature, initial coordinates).
        const DOF_PROPERTIES = 1 << 2;
        /// Initial body poses and twists.
        const BODY_PROPERTIES = 1 << 3;
        /// Body mass, inertia and centre of mass.
        const BODY_INERTIAL_PROPERTIES = 1 << 4;
        /// Shape transforms, geometry and contact materials.
        const SHAPE_PROPERTIES = 1 << 5;
    }
}
