//! Penalty contact between particles and non-adjacent triangles.

use kinema_math::geometry::closest_point_barycentric;
use kinema_math::norms::normalize_or_zero;
use kinema_types::constants::EPSILON;

use super::ForceContext;

/// Pushes a particle out of the contact band around a triangle.
///
/// The domain is `triangles × particles`: `tid / n_particles` selects the
/// triangle and `tid % n_particles` the particle. A triangle never
/// collides with its own vertices. The reaction is spread over the
/// triangle's vertices by the barycentric weights of the closest point,
/// so the pair exerts no net force.
pub fn eval(ctx: &ForceContext, tid: usize) {
    let n_particles = ctx.model.particle_count();
    let face = tid / n_particles;
    let p = tid % n_particles;

    if !ctx.model.particle_flags[p].is_active() {
        return;
    }

    let tri = &ctx.model.triangles[face];
    let [i, j, k] = tri.indices.map(|v| v as usize);
    if p == i || p == j || p == k {
        return;
    }

    let x = &ctx.state.particle_positions;
    let pos = x[p];
    let bary = closest_point_barycentric(x[i], x[j], x[k], pos);
    let closest = x[i] * bary.x + x[j] * bary.y + x[k] * bary.z;

    let diff = pos - closest;
    let dist = diff.length();
    let params = &ctx.model.triangle_contact;
    let c = (dist - params.distance).min(0.0);
    if c == 0.0 {
        return;
    }
    let n = normalize_or_zero(diff, EPSILON);
    let fn_ = n * c * params.ke;

    let f = &ctx.state.particle_forces;
    f.sub(p, fn_);
    f.add(i, fn_ * bary.x);
    f.add(j, fn_ * bary.y);
    f.add(k, fn_ * bary.z);
}
