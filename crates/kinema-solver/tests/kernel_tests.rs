//! Tests for the integrator, joint kinematics helpers and the particle grid.

use kinema_math::{Mat3, Quat, Transform, Twist, Vec3, Wrench};
use kinema_model::Body;
use kinema_solver::forces::joint::{rotation_vector, twist_angle};
use kinema_solver::integrate::{integrate_body, integrate_particle};
use kinema_solver::{BodyForceFrame, ParticleGrid, SemiImplicitConfig};
use kinema_types::ParticleFlags;

fn unit_body() -> Body {
    Body {
        transform: Transform::IDENTITY,
        angular_velocity: Vec3::ZERO,
        linear_velocity: Vec3::ZERO,
        com: Vec3::ZERO,
        mass: 2.0,
        inv_mass: 0.5,
        inertia: Mat3::IDENTITY,
        inv_inertia: Mat3::IDENTITY,
    }
}

// ─── Integrator Tests ─────────────────────────────────────────

#[test]
fn particle_integration_is_symplectic_euler() {
    let (x, v) = integrate_particle(
        Vec3::ZERO,
        Vec3::X,
        Vec3::Y * 2.0,
        0.5,
        ParticleFlags::ACTIVE,
        Vec3::ZERO,
        f32::INFINITY,
        0.1,
    );
    // v' = v + F/m·dt, x' = x + v'·dt
    assert!((v - Vec3::new(1.0, 0.1, 0.0)).length() < 1e-6);
    assert!((x - Vec3::new(0.1, 0.01, 0.0)).length() < 1e-6);
}

#[test]
fn inactive_particle_integration_copies() {
    let (x, v) = integrate_particle(
        Vec3::ONE,
        Vec3::X,
        Vec3::Y * 100.0,
        1.0,
        ParticleFlags::empty(),
        Vec3::new(0.0, -9.81, 0.0),
        f32::INFINITY,
        0.1,
    );
    assert_eq!(x, Vec3::ONE);
    assert_eq!(v, Vec3::X);
}

#[test]
fn body_force_accelerates_com() {
    let body = unit_body();
    let config = SemiImplicitConfig::default();
    let (xf, tw) = integrate_body(
        &body,
        Transform::IDENTITY,
        Twist::ZERO,
        Wrench::new(Vec3::ZERO, Vec3::X * 4.0),
        Vec3::ZERO,
        &config,
        0.5,
    );
    assert!((tw.linear - Vec3::X).length() < 1e-6);
    assert!((xf.p - Vec3::X * 0.5).length() < 1e-6);
    assert!(tw.angular.length() < 1e-6);
}

#[test]
fn world_origin_torque_is_shifted_to_com() {
    let body = unit_body();
    let at = Transform::from_translation(Vec3::new(0.0, 2.0, 0.0));
    let force = Vec3::X;
    // A pure force through the COM, expressed about the world origin.
    let world_torque = at.p.cross(force);

    let world = SemiImplicitConfig {
        body_force_frame: BodyForceFrame::WorldOrigin,
        ..Default::default()
    };
    let (_, tw) = integrate_body(
        &body,
        at,
        Twist::ZERO,
        Wrench::new(world_torque, force),
        Vec3::ZERO,
        &world,
        0.1,
    );
    assert!(tw.angular.length() < 1e-6);
}

#[test]
fn gravity_skips_kinematic_bodies() {
    let body = Body {
        mass: 0.0,
        inv_mass: 0.0,
        inv_inertia: Mat3::ZERO,
        ..unit_body()
    };
    let config = SemiImplicitConfig::default();
    let (xf, tw) = integrate_body(
        &body,
        Transform::IDENTITY,
        Twist::ZERO,
        Wrench::ZERO,
        Vec3::new(0.0, -9.81, 0.0),
        &config,
        0.1,
    );
    assert_eq!(tw.linear, Vec3::ZERO);
    assert!(xf.p.length() < 1e-6);
}

#[test]
fn body_with_offset_com_rotates_about_com() {
    let body = Body {
        com: Vec3::X,
        ..unit_body()
    };
    let config = SemiImplicitConfig {
        angular_damping: 0.0,
        ..Default::default()
    };
    let twist = Twist::new(Vec3::Z, Vec3::ZERO);
    let (xf, _) = integrate_body(
        &body,
        Transform::IDENTITY,
        twist,
        Wrench::ZERO,
        Vec3::ZERO,
        &config,
        0.01,
    );
    // The COM stays put while the origin swings around it.
    assert!((xf.transform_point(body.com) - Vec3::X).length() < 1e-5);
    assert!(xf.p.length() > 1e-3);
}

// ─── Joint Helper Tests ───────────────────────────────────────

#[test]
fn twist_angle_about_axis() {
    let r = Quat::from_rotation_z(0.3);
    assert!((twist_angle(r, Vec3::Z) - 0.3).abs() < 1e-5);
    assert!(twist_angle(r, Vec3::X).abs() < 1e-5);
    assert!((twist_angle(Quat::from_rotation_z(-0.7), Vec3::Z) + 0.7).abs() < 1e-5);
}

#[test]
fn twist_angle_uses_shortest_arc() {
    // Same rotation, opposite quaternion sign.
    let r = -Quat::from_rotation_z(0.4);
    assert!((twist_angle(r, Vec3::Z) - 0.4).abs() < 1e-5);
}

#[test]
fn rotation_vector_matches_axis_angle() {
    let axis = Vec3::new(1.0, 2.0, -1.0).normalize();
    let r = Quat::from_axis_angle(axis, 0.8);
    assert!((rotation_vector(r) - axis * 0.8).length() < 1e-5);
    assert!(rotation_vector(Quat::IDENTITY).length() < 1e-7);
}

// ─── Grid Tests ───────────────────────────────────────────────

#[test]
fn grid_finds_neighbours_across_cells() {
    let positions = vec![
        Vec3::ZERO,
        Vec3::new(0.09, 0.0, 0.0),
        Vec3::new(-0.05, 0.05, 0.0),
        Vec3::new(5.0, 5.0, 5.0),
    ];
    let mut grid = ParticleGrid::new(0.1);
    grid.rebuild(&positions, 0.1);
    assert_eq!(grid.len(), 4);

    let mut found = Vec::new();
    grid.for_each_candidate(Vec3::ZERO, 0.1, |j| found.push(j));
    found.sort_unstable();
    assert_eq!(found, vec![0, 1, 2]);
}

#[test]
fn grid_query_larger_than_cell() {
    let positions: Vec<Vec3> = (0..10).map(|i| Vec3::X * i as f32 * 0.1).collect();
    let mut grid = ParticleGrid::default();
    grid.rebuild(&positions, 0.05);
    let mut count = 0;
    grid.for_each_candidate(Vec3::ZERO, 0.35, |_| count += 1);
    assert!(count >= 4);
}

#[test]
fn grid_rebuild_forgets_old_positions() {
    let mut grid = ParticleGrid::new(1.0);
    grid.rebuild(&[Vec3::ZERO], 1.0);
    grid.rebuild(&[Vec3::splat(10.0)], 1.0);
    let mut hits = 0;
    grid.for_each_candidate(Vec3::ZERO, 0.5, |_| hits += 1);
    assert_eq!(hits, 0);
}
