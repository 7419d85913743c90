//! Symplectic Euler integration of bodies and particles.
//!
//! Velocities are updated first from the accumulated forces, then
//! positions advance with the new velocities. Damping lives here and
//! nowhere else: bodies get an angular damping factor, particles only a
//! speed clamp.

use kinema_math::{Quat, Transform, Twist, Vec3, Wrench};
use kinema_model::{Body, Model, State};
use kinema_parallel::{for_each_zip_mut, Backend};
use kinema_types::{KinemaResult, ParticleFlags};

use crate::config::{BodyForceFrame, SemiImplicitConfig};

/// Advance one rigid body by `dt`.
///
/// `wrench` is the accumulated wrench in the configured force frame and is
/// shifted to the centre of mass first. Angular velocity is updated in the
/// body frame including the gyroscopic term, then scaled by
/// `1 − angular_damping·dt`.
pub fn integrate_body(
    body: &Body,
    transform: Transform,
    twist: Twist,
    wrench: Wrench,
    gravity: Vec3,
    config: &SemiImplicitConfig,
    dt: f32,
) -> (Transform, Twist) {
    let com = transform.transform_point(body.com);
    let torque = match config.body_force_frame {
        BodyForceFrame::CenterOfMass => wrench.torque,
        BodyForceFrame::WorldOrigin => wrench.torque - com.cross(wrench.force),
    };

    let g = if body.inv_mass > 0.0 { gravity } else { Vec3::ZERO };
    let v1 = twist.linear + (wrench.force * body.inv_mass + g) * dt;

    let q0 = transform.q;
    let wb = q0.inverse() * twist.angular;
    let tb = q0.inverse() * torque;
    let gyro = wb.cross(body.inertia * wb);
    let wb1 = wb + body.inv_inertia * (tb - gyro) * dt;
    let w1 = (q0 * wb1) * (1.0 - config.angular_damping * dt);

    let com1 = com + v1 * dt;
    let spin = Quat::from_xyzw(w1.x, w1.y, w1.z, 0.0);
    let q1 = (q0 + spin * q0 * (0.5 * dt)).normalize();
    let p1 = com1 - q1 * body.com;

    (Transform::new(p1, q1), Twist::new(w1, v1))
}

/// Advance one particle by `dt`. Inactive particles are copied unchanged.
#[allow(clippy::too_many_arguments)]
pub fn integrate_particle(
    x: Vec3,
    v: Vec3,
    f: Vec3,
    inv_mass: f32,
    flags: ParticleFlags,
    gravity: Vec3,
    max_velocity: f32,
    dt: f32,
) -> (Vec3, Vec3) {
    if !flags.is_active() {
        return (x, v);
    }
    let g = if inv_mass > 0.0 { gravity } else { Vec3::ZERO };
    let mut v1 = v + (f * inv_mass + g) * dt;
    let speed = v1.length();
    if speed > max_velocity {
        v1 *= max_velocity / speed;
    }
    (x + v1 * dt, v1)
}

/// Integrate every body of `state_in` into `state_out`.
pub fn bodies(
    backend: &dyn Backend,
    model: &Model,
    state_in: &State,
    state_out: &mut State,
    config: &SemiImplicitConfig,
    dt: f32,
) -> KinemaResult<()> {
    for_each_zip_mut(
        backend,
        &mut state_out.body_transforms,
        &mut state_out.body_twists,
        |i, transform, twist| {
            (*transform, *twist) = integrate_body(
                &model.bodies[i],
                state_in.body_transforms[i],
                state_in.body_twists[i],
                state_in.body_wrenches.get(i),
                model.gravity,
                config,
                dt,
            );
        },
    )
}

/// Integrate every particle of `state_in` into `state_out`.
pub fn particles(
    backend: &dyn Backend,
    model: &Model,
    state_in: &State,
    state_out: &mut State,
    dt: f32,
) -> KinemaResult<()> {
    for_each_zip_mut(
        backend,
        &mut state_out.particle_positions,
        &mut state_out.particle_velocities,
        |i, x, v| {
            (*x, *v) = integrate_particle(
                state_in.particle_positions[i],
                state_in.particle_velocities[i],
                state_in.particle_forces.get(i),
                model.particle_inv_mass[i],
                model.particle_flags[i],
                model.gravity,
                model.particle_max_velocity,
                dt,
            );
        },
    )
}
