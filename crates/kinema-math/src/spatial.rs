//! Rigid-body pose, velocity and force types.
//!
//! Bodies are stored as a [`Transform`] (position of the body origin and
//! orientation), a [`Twist`] (angular and linear velocity of the centre of
//! mass, world frame) and a [`Wrench`] (torque and force).

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid transform: rotation `q` followed by translation `p`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation.
    pub p: Vec3,
    /// Rotation (unit quaternion).
    pub q: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        p: Vec3::ZERO,
        q: Quat::IDENTITY,
    };

    /// Creates a transform from a translation and a rotation.
    #[inline]
    pub fn new(p: Vec3, q: Quat) -> Self {
        Self { p, q }
    }

    /// Pure translation.
    #[inline]
    pub fn from_translation(p: Vec3) -> Self {
        Self { p, q: Quat::IDENTITY }
    }

    /// Maps a point from local to parent coordinates.
    #[inline]
    pub fn transform_point(&self, x: Vec3) -> Vec3 {
        self.p + self.q * x
    }

    /// Rotates a direction from local to parent coordinates.
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.q * v
    }

    /// Inverse transform.
    #[inline]
    pub fn inverse(&self) -> Self {
        let q = self.q.inverse();
        Self { p: -(q * self.p), q }
    }
}

impl std::ops::Mul for Transform {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            p: self.p + self.q * rhs.p,
            q: self.q * rhs.q,
        }
    }
}

/// Spatial velocity of a rigid body (world frame, about the centre of mass).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Twist {
    /// Angular velocity (rad/s).
    pub angular: Vec3,
    /// Linear velocity of the centre of mass (m/s).
    pub linear: Vec3,
}

impl Twist {
    pub const ZERO: Self = Self {
        angular: Vec3::ZERO,
        linear: Vec3::ZERO,
    };

    #[inline]
    pub fn new(angular: Vec3, linear: Vec3) -> Self {
        Self { angular, linear }
    }

    /// Velocity of a material point at offset `r` from the centre of mass.
    #[inline]
    pub fn point_velocity(&self, r: Vec3) -> Vec3 {
        self.linear + self.angular.cross(r)
    }
}

/// Torque/force pair accumulated on a rigid body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Wrench {
    /// Torque (N·m).
    pub torque: Vec3,
    /// Force (N).
    pub force: Vec3,
}

impl Wrench {
    pub const ZERO: Self = Self {
        torque: Vec3::ZERO,
        force: Vec3::ZERO,
    };

    #[inline]
    pub fn new(torque: Vec3, force: Vec3) -> Self {
        Self { torque, force }
    }

    /// Wrench of a force `f` applied at offset `r` from the reference point.
    #[inline]
    pub fn from_force_at(r: Vec3, f: Vec3) -> Self {
        Self {
            torque: r.cross(f),
            force: f,
        }
    }
}

impl std::ops::Neg for Wrench {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            torque: -self.torque,
            force: -self.force,
        }
    }
}
