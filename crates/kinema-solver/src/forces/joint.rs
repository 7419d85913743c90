//! Penalty joints with axis drives and limits.
//!
//! Each joint is a spring-damper soft constraint between the parent and
//! child joint frames. The attachment removes the locked degrees of
//! freedom; prismatic and revolute joints additionally carry a drive on
//! their free axis. The parent receives the wrench and the child its
//! opposite, both taken at the respective joint frame origins.

use kinema_math::{Quat, Vec3};
use kinema_model::{JointAxis, JointKind, JointMode};
use kinema_types::constants::EPSILON;

use super::ForceContext;

/// Angular damping is scaled down relative to linear damping; full
/// `joint_attach_kd` on light bodies is unstable under explicit stepping.
const ANGULAR_DAMPING_SCALE: f32 = 0.01;

pub fn eval(ctx: &ForceContext, tid: usize) {
    let joint = &ctx.model.joints[tid];
    if joint.kind == JointKind::Free {
        return;
    }

    let transforms = &ctx.state.body_transforms;
    let twists = &ctx.state.body_twists;
    let child = joint.child.index();
    let parent = joint.parent.map(|p| p.index());

    let x_wp = match parent {
        Some(p) => transforms[p] * joint.parent_frame,
        None => joint.parent_frame,
    };
    let x_wc = transforms[child] * joint.child_frame;

    let (w_p, v_p) = match parent {
        Some(p) => (twists[p].angular, ctx.point_velocity(Some(p), x_wp.p)),
        None => (Vec3::ZERO, Vec3::ZERO),
    };
    let w_c = twists[child].angular;
    let v_c = ctx.point_velocity(Some(child), x_wc.p);

    let x_err = x_wc.p - x_wp.p;
    let v_err = v_c - v_p;
    let w_err = w_c - w_p;
    // Child orientation relative to the parent joint frame.
    let r_err = x_wp.q.inverse() * x_wc.q;

    let ke = ctx.config.joint_attach_ke;
    let kd = ctx.config.joint_attach_kd;
    let kd_angular = kd * ANGULAR_DAMPING_SCALE;

    let mut f_total = Vec3::ZERO;
    let mut t_total = Vec3::ZERO;

    match joint.kind {
        JointKind::Free => return,
        JointKind::Fixed => {
            f_total += x_err * ke + v_err * kd;
            t_total += x_wp.transform_vector(rotation_vector(r_err)) * ke + w_err * kd_angular;
        }
        JointKind::Prismatic => {
            let axis_p = x_wp.transform_vector(joint.axis.axis);
            let q = x_err.dot(axis_p);
            let qd = v_err.dot(axis_p);
            let drive = axis_drive(ctx, &joint.axis, tid, q, qd);
            f_total -= axis_p * drive;

            // Attach everything except displacement along the axis.
            f_total += (x_err - axis_p * q) * ke + (v_err - axis_p * qd) * kd;
            t_total += x_wp.transform_vector(rotation_vector(r_err)) * ke + w_err * kd_angular;
        }
        JointKind::Revolute => {
            let axis = joint.axis.axis;
            let axis_p = x_wp.transform_vector(axis);
            let axis_c = x_wc.transform_vector(axis);
            let q = twist_angle(r_err, axis);
            let qd = w_err.dot(axis_p);
            let drive = axis_drive(ctx, &joint.axis, tid, q, qd);
            t_total -= axis_p * drive;

            // Swing error keeps the child axis aligned with the parent axis.
            let swing_err = axis_p.cross(axis_c);
            f_total += x_err * ke + v_err * kd;
            t_total += swing_err * ke + (w_err - axis_p * qd) * kd_angular;
        }
        JointKind::Ball => {
            f_total += x_err * ke + v_err * kd;
            t_total += w_err * kd_angular;
        }
    }

    let wrenches = &ctx.state.body_wrenches;
    if let Some(p) = parent {
        wrenches.add(p, ctx.body_wrench(p, x_wp.p, f_total, t_total));
    }
    wrenches.sub(child, ctx.body_wrench(child, x_wc.p, f_total, t_total));
}

/// Generalized force on a joint coordinate: drive target, limit spring and
/// feed-forward. Positive values push the coordinate up.
///
/// Without a caller control only limits act. Limit damping is active only
/// while a limit is violated, and a violated limit overrides a velocity
/// target.
pub fn axis_drive(ctx: &ForceContext, axis: &JointAxis, joint: usize, q: f32, qd: f32) -> f32 {
    let slot = ctx.joints.axis_start.get(joint).copied().unwrap_or(0);
    let (target, feed_forward) = if ctx.has_control {
        (
            ctx.control.joint_targets.get(slot).copied().unwrap_or(0.0),
            ctx.control.joint_forces.get(slot).copied().unwrap_or(0.0),
        )
    } else {
        (0.0, 0.0)
    };

    let mut target_f = match (ctx.has_control, axis.mode) {
        (false, _) | (_, JointMode::None) => 0.0,
        (true, JointMode::Position) => axis.target_ke * (target - q) - axis.target_kd * qd,
        (true, JointMode::Velocity) => axis.target_ke * (target - qd),
    };

    let mut limit_f = 0.0;
    let bound = if q < axis.limit_lower {
        Some(axis.limit_lower)
    } else if q > axis.limit_upper {
        Some(axis.limit_upper)
    } else {
        None
    };
    if let Some(bound) = bound {
        limit_f = axis.limit_ke * (bound - q) - axis.limit_kd * qd;
        if axis.mode == JointMode::Velocity {
            target_f = 0.0;
        }
    }

    feed_forward + target_f + limit_f
}

/// Rotation vector (axis × angle) of a unit quaternion, shortest arc.
pub fn rotation_vector(r: Quat) -> Vec3 {
    let r = if r.w < 0.0 { -r } else { r };
    let v = Vec3::new(r.x, r.y, r.z);
    let s = v.length();
    if s < EPSILON {
        return v * 2.0;
    }
    v * (2.0 * s.atan2(r.w) / s)
}

/// Signed twist angle of `r` about unit `axis` (swing-twist decomposition).
pub fn twist_angle(r: Quat, axis: Vec3) -> f32 {
    let r = if r.w < 0.0 { -r } else { r };
    let s = axis.dot(Vec3::new(r.x, r.y, r.z));
    if s.abs() < EPSILON && r.w.abs() < EPSILON {
        return 0.0;
    }
    2.0 * s.atan2(r.w)
}
