//! Volumetric FEM forces for tetrahedral elements.
//!
//! Two constitutive models:
//! - **Stable Neo-Hookean** (Smith et al. 2018): deviatoric term
//!   `μ (1 − 1/(I_C + 1)) F` plus a volume term on `J = det F` whose rest
//!   offset makes the undeformed element force-free.
//! - **Corotational linear**: `P = 2μ (F − R) + λ tr(RᵀF − I) R` with `R`
//!   from the polar decomposition of `F`.

use kinema_math::decomposition::{polar_rotation, trace};
use kinema_math::Mat3;

use crate::config::FemModel;

use super::ForceContext;

pub fn eval(ctx: &ForceContext, tid: usize) {
    let tet = &ctx.model.tetrahedra[tid];
    let [i, j, k, l] = tet.indices.map(|v| v as usize);

    let x = &ctx.state.particle_positions;
    let v = &ctx.state.particle_velocities;

    let x10 = x[j] - x[i];
    let x20 = x[k] - x[i];
    let x30 = x[l] - x[i];
    let v10 = v[j] - v[i];
    let v20 = v[k] - v[i];
    let v30 = v[l] - v[i];

    let ds = Mat3::from_cols(x10, x20, x30);
    let dm = tet.dm_inv;
    let f_mat = ds * dm;
    let dfdt = Mat3::from_cols(v10, v20, v30) * dm;

    let mat = &tet.material;
    let rest_volume = tet.rest_volume;
    let activation = ctx.control.tet_activations.get(tid).copied().unwrap_or(0.0);

    let [f1, f2, f3] = match ctx.config.fem_model {
        FemModel::NeoHookean => {
            let ic = f_mat.x_axis.length_squared()
                + f_mat.y_axis.length_squared()
                + f_mat.z_axis.length_squared();
            let p = f_mat * (mat.k_mu * (1.0 - 1.0 / (ic + 1.0))) + dfdt * mat.k_damp;
            let h = p * dm.transpose();
            let mut cols = [h.x_axis, h.y_axis, h.z_axis];

            // Volume term λ·(J − α + a) with α = 1 + μ/λ − μ/(4λ), expanded
            // so that λ = 0 keeps the rest offset.
            let j_vol = f_mat.determinant();
            let s = 1.0 / (6.0 * rest_volume);
            let djdx = [x20.cross(x30) * s, x30.cross(x10) * s, x10.cross(x20) * s];
            let f_volume = mat.k_lambda * (j_vol - 1.0 + activation) - 0.75 * mat.k_mu;
            let f_damp = mat.k_damp * (djdx[0].dot(v10) + djdx[1].dot(v20) + djdx[2].dot(v30));
            for (col, dj) in cols.iter_mut().zip(djdx) {
                *col += dj * (f_volume + f_damp);
            }
            cols
        }
        FemModel::Corotational => {
            let r = polar_rotation(f_mat);
            let strain = trace(r.transpose() * f_mat) - 3.0 + activation;
            let p = (f_mat - r) * (2.0 * mat.k_mu) + r * (mat.k_lambda * strain) + dfdt * mat.k_damp;
            let h = p * dm.transpose();
            [h.x_axis, h.y_axis, h.z_axis]
        }
    };

    let f = &ctx.state.particle_forces;
    f.add(i, (f1 + f2 + f3) * rest_volume);
    f.sub(j, f1 * rest_volume);
    f.sub(k, f2 * rest_volume);
    f.sub(l, f3 * rest_volume);
}
