//! Smooth norms for friction models.

use glam::Vec3;

/// Huber norm of `v` with transition width `delta`.
///
/// Quadratic (`|v|² / 2δ`) below `delta`, linear (`|v| − δ/2`) above it.
/// The result is C¹ at the transition and its gradient vanishes smoothly
/// at zero, which removes the stick-slip discontinuity of `|v|`.
#[inline]
pub fn norm_huber(v: Vec3, delta: f32) -> f32 {
    let a = v.length_squared();
    if a <= delta * delta {
        0.5 * a / delta
    } else {
        a.sqrt() - 0.5 * delta
    }
}

/// Normalizes `v`, returning zero for vectors shorter than `eps`.
#[inline]
pub fn normalize_or_zero(v: Vec3, eps: f32) -> Vec3 {
    let len = v.length();
    if len > eps {
        v / len
    } else {
        Vec3::ZERO
    }
}

/// Step function used to gate penalty terms: 1 when `x < 0`, else 0.
#[inline]
pub fn step_negative(x: f32) -> f32 {
    if x < 0.0 {
        1.0
    } else {
        0.0
    }
}
