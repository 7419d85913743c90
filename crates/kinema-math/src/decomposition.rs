//! Matrix decompositions for volumetric constitutive models.
//!
//! Provides the rotation factor of the polar decomposition F = R·S needed
//! by corotational tetrahedral FEM.

use glam::Mat3;

const MAX_POLAR_ITERATIONS: usize = 20;
const POLAR_TOLERANCE: f32 = 1.0e-6;

/// Rotation part of the polar decomposition of a 3×3 matrix.
///
/// Uses the Higham iteration R ← ½ (R + R⁻ᵀ), which converges
/// quadratically for well-conditioned F. Singular input returns identity.
/// Inverted elements (det F < 0) converge to an improper orthogonal matrix.
pub fn polar_rotation(f: Mat3) -> Mat3 {
    let mut r = f;
    for _ in 0..MAX_POLAR_ITERATIONS {
        if r.determinant().abs() < kinema_types::constants::DEGENERATE_AREA_THRESHOLD {
            return Mat3::IDENTITY;
        }
        let next = (r + r.inverse().transpose()) * 0.5;
        let converged = next.abs_diff_eq(r, POLAR_TOLERANCE);
        r = next;
        if converged {
            break;
        }
    }
    r
}

/// Trace of a 3×3 matrix.
#[inline]
pub fn trace(m: Mat3) -> f32 {
    m.x_axis.x + m.y_axis.y + m.z_axis.z
}
