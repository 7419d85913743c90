//! Soft contact between particles and body shapes.

use kinema_math::norms::{normalize_or_zero, step_negative};
use kinema_math::Vec3;
use kinema_types::constants::EPSILON;

use super::ForceContext;

/// Penalty force between a particle and a shape, coupled back onto the
/// shape's body.
///
/// Coefficients are the model's soft-contact parameters averaged with the
/// shape material. Damping and friction act only under penetration. The
/// particle receives `−f` and the body `+f` at the contact point; static
/// shapes absorb the reaction.
pub fn eval(ctx: &ForceContext, tid: usize) {
    let contact = &ctx.contacts.soft[tid];
    let p = contact.particle.index();
    let s = contact.shape.index();

    let model = ctx.model;
    if !model.particle_flags[p].is_active() {
        return;
    }

    let body = ctx.shapes.body[s];
    let mat = model
        .soft_contact
        .particle_material(model.particle_contact.adhesion)
        .average(&model.shapes[s].material);

    let px = ctx.state.particle_positions[p];
    let pv = ctx.state.particle_velocities[p];
    let bx = ctx.world_point(body, contact.body_point);
    let n = contact.normal;

    let c = n.dot(px - bx) - model.particle_radius[p];
    if c > mat.ka {
        return;
    }

    // Velocity of the surface point, including any prescribed surface motion.
    let surface_velocity = match body {
        Some(b) => ctx.state.body_transforms[b].transform_vector(contact.body_velocity),
        None => contact.body_velocity,
    };
    let bv = ctx.point_velocity(body, bx) + surface_velocity;

    let v = pv - bv;
    let vn = n.dot(v);
    let vt = v - n * vn;

    let f_n = n * c * mat.ke;
    let f_d = n * vn.min(0.0) * mat.kd;
    let f_t = normalize_or_zero(vt, EPSILON) * (mat.kf * vt.length()).min((mat.mu * c * mat.ke).abs());

    let f_total = f_n + (f_d + f_t) * step_negative(c);

    ctx.state.particle_forces.sub(p, f_total);
    if let Some(b) = body {
        ctx.state
            .body_wrenches
            .add(b, ctx.body_wrench(b, bx, f_total, Vec3::ZERO));
    }
}
