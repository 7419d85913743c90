//! 3×2 matrix type for deformation gradients of membrane elements.
//!
//! Cloth triangles are 2D manifolds embedded in 3D space. The deformation
//! gradient F is a 3×2 matrix mapping from the 2D rest configuration to
//! the 3D deformed configuration.

use glam::{Mat2, Vec3};
use serde::{Deserialize, Serialize};

/// A 3×2 column-major matrix.
///
/// Columns are the deformed edge vectors of a triangle mapped through the
/// inverse of the rest-state edge matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat3x2 {
    /// First column (3 components).
    pub col0: Vec3,
    /// Second column (3 components).
    pub col1: Vec3,
}

impl Mat3x2 {
    /// Creates a new 3×2 matrix from two column vectors.
    #[inline]
    pub fn from_cols(col0: Vec3, col1: Vec3) -> Self {
        Self { col0, col1 }
    }

    /// The zero matrix.
    pub const ZERO: Self = Self {
        col0: Vec3::ZERO,
        col1: Vec3::ZERO,
    };

    /// First two columns of the 3×3 identity.
    pub const IDENTITY: Self = Self {
        col0: Vec3::X,
        col1: Vec3::Y,
    };

    /// Frobenius norm squared: ||F||_F^2 = trace(F^T F).
    #[inline]
    pub fn frobenius_norm_sq(&self) -> f32 {
        self.col0.length_squared() + self.col1.length_squared()
    }

    /// Right-multiply by a 2×2 matrix: `self * m`.
    #[inline]
    pub fn mul_mat2(&self, m: Mat2) -> Self {
        Self {
            col0: self.col0 * m.x_axis.x + self.col1 * m.x_axis.y,
            col1: self.col0 * m.y_axis.x + self.col1 * m.y_axis.y,
        }
    }

    /// Right-multiply by the transpose of a 2×2 matrix: `self * mᵀ`.
    ///
    /// Maps a first Piola stress back onto the two free triangle vertices.
    #[inline]
    pub fn mul_mat2_transpose(&self, m: Mat2) -> Self {
        self.mul_mat2(m.transpose())
    }
}

impl std::ops::Add for Mat3x2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            col0: self.col0 + rhs.col0,
            col1: self.col1 + rhs.col1,
        }
    }
}

impl std::ops::Sub for Mat3x2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            col0: self.col0 - rhs.col0,
            col1: self.col1 - rhs.col1,
        }
    }
}

impl std::ops::Mul<f32> for Mat3x2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self {
            col0: self.col0 * rhs,
            col1: self.col1 * rhs,
        }
    }
}

/// Compute the deformation gradient F for a triangle.
///
/// F = Ds · Dm⁻¹, where Ds = [p1-p0, p2-p0] (3×2) and `dm_inv` is the
/// precomputed inverse of the rest edge matrix.
#[inline]
pub fn deformation_gradient(p0: Vec3, p1: Vec3, p2: Vec3, dm_inv: Mat2) -> Mat3x2 {
    Mat3x2::from_cols(p1 - p0, p2 - p0).mul_mat2(dm_inv)
}
