//! Membrane forces for triangle elements.
//!
//! In-plane elasticity follows the stable Neo-Hookean split: a deviatoric
//! term on the deformation gradient plus an area term whose rest offset
//! cancels the deviatoric force at rest. Warp/weft/shear materials swap
//! the deviatoric term for direction-wise stretch and shear springs.
//! Aerodynamic lift and drag act on the triangle's mean velocity.

use std::f32::consts::FRAC_PI_2;

use kinema_math::norms::normalize_or_zero;
use kinema_math::{Mat3x2, Vec3};
use kinema_model::AnisotropicStiffness;
use kinema_types::constants::{DEGENERATE_AREA_THRESHOLD, DEGENERATE_LENGTH, EPSILON};

use super::ForceContext;

pub fn eval(ctx: &ForceContext, tid: usize) {
    let tri = &ctx.model.triangles[tid];
    let i = tri.indices[0] as usize;
    let j = tri.indices[1] as usize;
    let k = tri.indices[2] as usize;

    let x = &ctx.state.particle_positions;
    let v = &ctx.state.particle_velocities;
    let (x0, x1, x2) = (x[i], x[j], x[k]);
    let (v0, v1, v2) = (v[i], v[j], v[k]);

    let x10 = x1 - x0;
    let x20 = x2 - x0;
    let v10 = v1 - v0;
    let v20 = v2 - v0;

    let mat = &tri.material;
    let rest_area = tri.rest_area;
    let inv_rest_area = 1.0 / rest_area;
    let k_mu = mat.ke * rest_area;
    let k_lambda = mat.ka * rest_area;
    let k_damp = mat.kd * rest_area;

    let f_mat = Mat3x2::from_cols(x10, x20).mul_mat2(tri.dm_inv);
    let dfdt = Mat3x2::from_cols(v10, v20).mul_mat2(tri.dm_inv);

    // Deviatoric stress; the area term below carries the matching offset.
    let (stress, mu_offset) = match &mat.anisotropy {
        None => (f_mat * k_mu, k_mu),
        Some(aniso) => (anisotropic_stress(f_mat, aniso) * rest_area, 0.0),
    };
    let h = (stress + dfdt * k_damp).mul_mat2_transpose(tri.dm_inv);
    let mut f1 = h.col0;
    let mut f2 = h.col1;

    let n = x10.cross(x20);
    let area = 0.5 * n.length();
    if area < DEGENERATE_AREA_THRESHOLD {
        apply(ctx, [i, j, k], f1, f2);
        return;
    }
    let n = n / (2.0 * area);

    // Area preservation. λ·(J − α + a) with α = 1 + μ/λ, written without
    // the division so that λ = 0 still keeps the rest offset.
    let activation = ctx.control.triangle_activations.get(tid).copied().unwrap_or(0.0);
    let j_area = area * inv_rest_area;
    let f_area = k_lambda * (j_area - 1.0 + activation) - mu_offset;

    let dcdq = x20.cross(n) * inv_rest_area * 0.5;
    let dcdr = n.cross(x10) * inv_rest_area * 0.5;
    let dcdt = dcdq.dot(v10) + dcdr.dot(v20);
    let f_total = f_area + k_damp * dcdt;
    f1 += dcdq * f_total;
    f2 += dcdr * f_total;

    let mut f0 = f1 + f2;

    // Lift and drag on the mean velocity.
    if mat.drag != 0.0 || mat.lift != 0.0 {
        let vmid = (v0 + v1 + v2) * (1.0 / 3.0);
        let vdir = normalize_or_zero(vmid, EPSILON);
        if vdir != Vec3::ZERO {
            let f_drag = vmid * (mat.drag * area * n.dot(vmid).abs());
            let cos = n.dot(vdir).clamp(-1.0, 1.0);
            let f_lift = n * (mat.lift * area * (FRAC_PI_2 - cos.acos())) * vmid.length_squared();
            let aero = f_drag + f_lift;
            f0 -= aero;
            f1 += aero;
            f2 += aero;
        }
    }

    let f = &ctx.state.particle_forces;
    f.add(i, f0);
    f.sub(j, f1);
    f.sub(k, f2);
}

/// Scatter the elastic part only, used when the triangle has collapsed.
fn apply(ctx: &ForceContext, [i, j, k]: [usize; 3], f1: Vec3, f2: Vec3) {
    let f = &ctx.state.particle_forces;
    f.add(i, f1 + f2);
    f.sub(j, f1);
    f.sub(k, f2);
}

/// Stress of independent warp, weft and shear springs (per unit rest area).
///
/// Energy `kw/2 (|F₁|−1)² + kf/2 (|F₂|−1)² + ks/2 (F₁·F₂)²` on the
/// columns of the deformation gradient. Zero at rest.
fn anisotropic_stress(f: Mat3x2, k: &AnisotropicStiffness) -> Mat3x2 {
    let l1 = f.col0.length();
    let l2 = f.col1.length();
    let shear = f.col0.dot(f.col1);

    let mut p1 = f.col1 * (k.shear * shear);
    let mut p2 = f.col0 * (k.shear * shear);
    if l1 > DEGENERATE_LENGTH {
        p1 += f.col0 * (k.warp * (l1 - 1.0) / l1);
    }
    if l2 > DEGENERATE_LENGTH {
        p2 += f.col1 * (k.weft * (l2 - 1.0) / l2);
    }
    Mat3x2::from_cols(p1, p2)
}
