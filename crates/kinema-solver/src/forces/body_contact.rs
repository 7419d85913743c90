//! Rigid body contact: normal penalty with smoothed Coulomb friction.

use kinema_math::norms::norm_huber;
use kinema_math::Vec3;

use super::ForceContext;

/// Contact force between the two shapes of a rigid contact.
///
/// The contact is active while the signed gap is below the averaged
/// adhesion distance `ka`. Damping acts only under penetration. Friction
/// uses the Huber norm of the tangential velocity, so it fades smoothly
/// to zero at rest instead of switching direction.
pub fn eval(ctx: &ForceContext, tid: usize) {
    let contact = &ctx.contacts.rigid[tid];
    let a = contact.shape_a.index();
    let b = contact.shape_b.index();
    let body_a = ctx.shapes.body[a];
    let body_b = ctx.shapes.body[b];

    let shapes = &ctx.model.shapes;
    let mat = shapes[a].material.average(&shapes[b].material);

    let bx_a = ctx.world_point(body_a, contact.point_a);
    let bx_b = ctx.world_point(body_b, contact.point_b);
    let n = contact.normal;

    let d = n.dot(bx_a - bx_b) - contact.thickness;
    if d >= mat.ka {
        return;
    }

    let v = ctx.point_velocity(body_a, bx_a) - ctx.point_velocity(body_b, bx_b);
    let vn = n.dot(v);
    let vt = v - n * vn;

    let f_n = d * mat.ke;
    let f_d = if d < 0.0 { vn.min(0.0) * mat.kd } else { 0.0 };

    let vs = norm_huber(vt, ctx.config.friction_smoothing);
    let limit = (-mat.mu * (f_n + f_d)).max(0.0);
    let f_t = if vs > 0.0 {
        vt / vs * (mat.kf * vs).min(limit)
    } else {
        Vec3::ZERO
    };

    let f_total = n * (f_n + f_d) + f_t;

    let wrenches = &ctx.state.body_wrenches;
    if let Some(ba) = body_a {
        wrenches.sub(ba, ctx.body_wrench(ba, bx_a, f_total, Vec3::ZERO));
    }
    if let Some(bb) = body_b {
        wrenches.add(bb, ctx.body_wrench(bb, bx_b, f_total, Vec3::ZERO));
    }
}
