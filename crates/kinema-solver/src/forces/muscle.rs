//! Line-of-action muscle actuators.

use kinema_math::norms::normalize_or_zero;
use kinema_math::Vec3;
use kinema_types::constants::EPSILON;

use super::ForceContext;

/// Applies `activation · max_force` along every muscle segment that spans
/// two different bodies.
///
/// Each segment pulls its two attachment points toward each other.
/// Segments within one body are internal and skipped.
pub fn eval(ctx: &ForceContext, tid: usize) {
    let muscle = &ctx.model.muscles[tid];
    let activation = ctx.control.muscle_activations.get(tid).copied().unwrap_or(0.0);
    if activation == 0.0 {
        return;
    }
    let magnitude = activation * muscle.max_force;

    let transforms = &ctx.state.body_transforms;
    let wrenches = &ctx.state.body_wrenches;
    for segment in muscle.waypoints.windows(2) {
        let (w0, w1) = (&segment[0], &segment[1]);
        if w0.body == w1.body {
            continue;
        }
        let b0 = w0.body.index();
        let b1 = w1.body.index();
        let p0 = transforms[b0].transform_point(w0.point);
        let p1 = transforms[b1].transform_point(w1.point);

        let n = normalize_or_zero(p1 - p0, EPSILON);
        if n == Vec3::ZERO {
            continue;
        }
        let f = n * magnitude;
        wrenches.add(b0, ctx.body_wrench(b0, p0, f, Vec3::ZERO));
        wrenches.sub(b1, ctx.body_wrench(b1, p1, f, Vec3::ZERO));
    }
}
