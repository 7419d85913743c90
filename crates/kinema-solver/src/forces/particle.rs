//! Particle–particle contact: repulsion, cohesion and friction.

use kinema_math::Vec3;
use kinema_types::constants::EPSILON;

use super::ForceContext;

/// Accumulates the contact force on particle `tid` from its neighbours.
///
/// A pair interacts while the gap `d − rᵢ − rⱼ` is at most the cohesion
/// distance. Each particle writes only its own force; the pair force is
/// antisymmetric, so both sides together conserve momentum. Inactive
/// particles neither receive nor exert contact forces.
pub fn eval(ctx: &ForceContext, tid: usize) {
    let model = ctx.model;
    if !model.particle_flags[tid].is_active() {
        return;
    }

    let params = &model.particle_contact;
    let x = &ctx.state.particle_positions;
    let v = &ctx.state.particle_velocities;
    let xi = x[tid];
    let vi = v[tid];
    let ri = model.particle_radius[tid];
    let cohesion = params.cohesion.max(0.0);
    let search = ri + model.particle_max_radius + cohesion;

    let mut f = Vec3::ZERO;
    ctx.grid.for_each_candidate(xi, search, |j| {
        if j == tid || !model.particle_flags[j].is_active() {
            return;
        }
        let n = xi - x[j];
        let d = n.length();
        if d < EPSILON {
            return;
        }
        let err = d - ri - model.particle_radius[j];
        if err > cohesion {
            return;
        }
        f += contact_force(n / d, vi - v[j], err, params.ke, params.kd, params.kf, params.mu);
    });

    if f != Vec3::ZERO {
        ctx.state.particle_forces.add(tid, f);
    }
}

/// Penalty contact force on the first particle of a pair.
///
/// `n` points from the other particle toward this one, `v` is the relative
/// velocity and `c` the signed gap. Friction is bounded by `mu` times the
/// normal force.
#[inline]
pub fn contact_force(n: Vec3, v: Vec3, c: f32, ke: f32, kd: f32, kf: f32, mu: f32) -> Vec3 {
    let vn = n.dot(v);
    let f_normal = c * ke + vn.min(0.0) * kd;

    let vt = v - n * vn;
    let vs = vt.length();
    let ft = if vs > 0.0 {
        vt / vs * (vs * kf).min(mu * f_normal.abs())
    } else {
        Vec3::ZERO
    };

    -n * f_normal - ft
}
