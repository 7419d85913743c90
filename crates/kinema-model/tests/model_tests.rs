//! Integration tests for kinema-model.

use kinema_math::{Quat, Transform, Vec3};
use kinema_model::generators::{add_cloth_grid, add_soft_block, ClothGrid, SoftBlock};
use kinema_model::{
    BodyDesc, ContactMaterial, JointAxis, JointDesc, JointKind, ModelBuilder, MuscleWaypoint,
    ShapeGeometry, TetMaterial, Topology, TriangleMaterial,
};
use kinema_types::{BodyId, KinemaError, ParticleFlags};

fn two_particles(separation: f32) -> ModelBuilder {
    let mut b = ModelBuilder::new();
    b.add_particle(Vec3::ZERO, Vec3::ZERO, 1.0, 0.0).unwrap();
    b.add_particle(Vec3::X * separation, Vec3::ZERO, 1.0, 0.0).unwrap();
    b
}

fn unit_triangle() -> ModelBuilder {
    let mut b = ModelBuilder::new();
    b.add_particle(Vec3::ZERO, Vec3::ZERO, 1.0, 0.0).unwrap();
    b.add_particle(Vec3::X, Vec3::ZERO, 1.0, 0.0).unwrap();
    b.add_particle(Vec3::Y, Vec3::ZERO, 1.0, 0.0).unwrap();
    b
}

// ─── Particle Tests ───────────────────────────────────────────

#[test]
fn particles_default_active() {
    let model = two_particles(1.0).finalize().unwrap();
    assert_eq!(model.particle_count(), 2);
    assert!(model.particle_flags.iter().all(|f| f.is_active()));
    assert_eq!(model.particle_inv_mass, vec![1.0, 1.0]);
}

#[test]
fn zero_mass_particle_has_zero_inverse() {
    let mut b = ModelBuilder::new();
    b.add_particle(Vec3::ZERO, Vec3::ZERO, 0.0, 0.1).unwrap();
    let model = b.finalize().unwrap();
    assert_eq!(model.particle_inv_mass[0], 0.0);
    assert!((model.particle_max_radius - 0.1).abs() < 1e-6);
}

#[test]
fn negative_mass_rejected() {
    let mut b = ModelBuilder::new();
    let err = b.add_particle(Vec3::ZERO, Vec3::ZERO, -1.0, 0.0).unwrap_err();
    assert!(matches!(err, KinemaError::InvalidParameter(_)));
}

#[test]
fn non_finite_position_rejected() {
    let mut b = ModelBuilder::new();
    assert!(b
        .add_particle(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ZERO, 1.0, 0.0)
        .is_err());
}

#[test]
fn set_particle_active_toggles_flag() {
    let mut model = two_particles(1.0).finalize().unwrap();
    model.set_particle_active(1, false).unwrap();
    assert!(!model.particle_flags[1].contains(ParticleFlags::ACTIVE));
    assert!(model.set_particle_active(5, false).is_err());
}

// ─── Spring Tests ─────────────────────────────────────────────

#[test]
fn spring_rest_length_from_positions() {
    let mut b = two_particles(1.5);
    b.add_spring(0, 1, 10.0, 0.0).unwrap();
    let model = b.finalize().unwrap();
    assert!((model.springs[0].rest_length - 1.5).abs() < 1e-6);
}

#[test]
fn spring_out_of_range_rejected() {
    let mut b = two_particles(1.0);
    let err = b.add_spring(0, 7, 1.0, 0.0).unwrap_err();
    assert!(matches!(err, KinemaError::InvalidTopology(_)));
    assert!(err.to_string().contains("particle 7"));
}

#[test]
fn spring_repeated_vertex_rejected() {
    let mut b = two_particles(1.0);
    assert!(b.add_spring(1, 1, 1.0, 0.0).is_err());
}

#[test]
fn spring_coincident_endpoints_rejected() {
    let mut b = two_particles(0.0);
    assert!(b.add_spring(0, 1, 1.0, 0.0).is_err());
}

// ─── Triangle Tests ───────────────────────────────────────────

#[test]
fn triangle_rest_data() {
    let mut b = unit_triangle();
    b.add_triangle(0, 1, 2, TriangleMaterial::default()).unwrap();
    let model = b.finalize().unwrap();
    let tri = &model.triangles[0];
    assert!((tri.rest_area - 0.5).abs() < 1e-6);
    // Rest frame aligned with the first edge: Dm is identity
    assert!(tri.dm_inv.abs_diff_eq(kinema_math::Mat2::IDENTITY, 1e-5));
    // det(Dm⁻¹) = 1 / (2·area)
    assert!((tri.dm_inv.determinant() * 2.0 * tri.rest_area - 1.0).abs() < 1e-5);
}

#[test]
fn degenerate_triangle_rejected() {
    let mut b = ModelBuilder::new();
    for i in 0..3 {
        b.add_particle(Vec3::X * i as f32, Vec3::ZERO, 1.0, 0.0).unwrap();
    }
    let err = b.add_triangle(0, 1, 2, TriangleMaterial::default()).unwrap_err();
    assert!(err.to_string().contains("degenerate"));
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn topology_two_triangles_one_interior_edge() {
    let tris = [[0, 1, 2], [2, 1, 3]];
    let topo = Topology::build(4, &tris);
    assert_eq!(topo.edges.len(), 5);
    assert_eq!(topo.interior_edges.len(), 1);
    assert_eq!(topo.boundary_edge_count(), 4);
    assert!(!topo.is_closed());
    let e = topo.interior_edges[0];
    assert_eq!((e.v0, e.v1), (1, 2));
    assert_eq!((e.wing_a, e.wing_b), (0, 3));
}

#[test]
fn topology_tetrahedron_surface_is_closed() {
    let tris = [[0, 1, 2], [0, 3, 1], [1, 3, 2], [2, 3, 0]];
    let topo = Topology::build(4, &tris);
    assert!(topo.is_closed());
    assert_eq!(topo.interior_edges.len(), 6);
}

// ─── Tetrahedron Tests ────────────────────────────────────────

#[test]
fn tetrahedron_rest_volume() {
    let mut b = unit_triangle();
    b.add_particle(Vec3::Z, Vec3::ZERO, 1.0, 0.0).unwrap();
    b.add_tetrahedron(0, 1, 2, 3, TetMaterial::default()).unwrap();
    let model = b.finalize().unwrap();
    assert!((model.tetrahedra[0].rest_volume - 1.0 / 6.0).abs() < 1e-6);
}

#[test]
fn inverted_tetrahedron_rejected() {
    let mut b = unit_triangle();
    b.add_particle(Vec3::Z, Vec3::ZERO, 1.0, 0.0).unwrap();
    assert!(b.add_tetrahedron(0, 2, 1, 3, TetMaterial::default()).is_err());
}

// ─── Body / Joint Tests ───────────────────────────────────────

#[test]
fn body_inverse_inertia() {
    let mut b = ModelBuilder::new();
    let id = b.add_body(BodyDesc::sphere(2.0, 0.5)).unwrap();
    let model = b.finalize().unwrap();
    let body = &model.bodies[id.index()];
    assert!((body.inv_mass - 0.5).abs() < 1e-6);
    let i = body.inertia * body.inv_inertia;
    assert!(i.abs_diff_eq(kinema_math::Mat3::IDENTITY, 1e-5));
}

#[test]
fn massless_body_is_kinematic() {
    let mut b = ModelBuilder::new();
    b.add_body(BodyDesc::default()).unwrap();
    let model = b.finalize().unwrap();
    assert!(model.bodies[0].is_kinematic());
}

#[test]
fn singular_inertia_rejected() {
    let mut b = ModelBuilder::new();
    let desc = BodyDesc {
        mass: 1.0,
        ..Default::default()
    };
    assert!(b.add_body(desc).is_err());
}

#[test]
fn joint_child_equal_parent_rejected() {
    let mut b = ModelBuilder::new();
    let body = b.add_body(BodyDesc::sphere(1.0, 0.1)).unwrap();
    let err = b
        .add_joint(JointDesc::new(JointKind::Fixed, Some(body), body))
        .unwrap_err();
    assert!(err.to_string().contains("itself"));
}

#[test]
fn joint_missing_body_rejected() {
    let mut b = ModelBuilder::new();
    assert!(b
        .add_joint(JointDesc::new(JointKind::Ball, None, BodyId(3)))
        .is_err());
}

#[test]
fn revolute_axis_is_normalized() {
    let mut b = ModelBuilder::new();
    let body = b.add_body(BodyDesc::sphere(1.0, 0.1)).unwrap();
    let axis = JointAxis {
        axis: Vec3::new(0.0, 0.0, 3.0),
        ..Default::default()
    };
    b.add_joint(JointDesc::new(JointKind::Revolute, None, body).with_axis(axis))
        .unwrap();
    let model = b.finalize().unwrap();
    assert!((model.joints[0].axis.axis - Vec3::Z).length() < 1e-6);
    assert_eq!(model.joint_axis_count(), 1);
    assert_eq!(model.control().joint_targets.len(), 1);
}

#[test]
fn revolute_zero_axis_rejected() {
    let mut b = ModelBuilder::new();
    let body = b.add_body(BodyDesc::sphere(1.0, 0.1)).unwrap();
    let axis = JointAxis {
        axis: Vec3::ZERO,
        ..Default::default()
    };
    assert!(b
        .add_joint(JointDesc::new(JointKind::Revolute, None, body).with_axis(axis))
        .is_err());
}

#[test]
fn shape_and_muscle_validation() {
    let mut b = ModelBuilder::new();
    let a = b.add_body(BodyDesc::sphere(1.0, 0.1)).unwrap();
    let c = b.add_body(BodyDesc::sphere(1.0, 0.1)).unwrap();
    assert!(b
        .add_shape(
            Some(a),
            Transform::IDENTITY,
            ShapeGeometry::Sphere { radius: -1.0 },
            ContactMaterial::default()
        )
        .is_err());
    b.add_ground_plane(ContactMaterial::default()).unwrap();

    let w = |body, point| MuscleWaypoint { body, point };
    assert!(b.add_muscle(vec![w(a, Vec3::ZERO)], 10.0).is_err());
    b.add_muscle(vec![w(a, Vec3::ZERO), w(c, Vec3::X)], 10.0).unwrap();
    let model = b.finalize().unwrap();
    assert_eq!(model.shape_count(), 1);
    assert_eq!(model.muscle_count(), 1);
}

// ─── State / Control Tests ────────────────────────────────────

#[test]
fn state_from_model() {
    let mut b = two_particles(1.0);
    b.add_body(
        BodyDesc::sphere(1.0, 0.1)
            .at(Transform::from_translation(Vec3::Y))
            .with_velocity(Vec3::X, Vec3::ZERO),
    )
    .unwrap();
    let model = b.finalize().unwrap();
    let state = model.state();
    assert_eq!(state.particle_count(), 2);
    assert_eq!(state.body_count(), 1);
    assert_eq!(state.particle_forces.len(), 2);
    assert_eq!(state.body_transforms[0].p, Vec3::Y);
    assert!(state.check_layout(&model).is_ok());
    assert!((state.body_momentum(&model) - Vec3::X).length() < 1e-6);
}

#[test]
fn state_layout_mismatch_detected() {
    let model = two_particles(1.0).finalize().unwrap();
    let mut state = model.state();
    state.particle_velocities.pop();
    let err = state.check_layout(&model).unwrap_err();
    assert!(matches!(err, KinemaError::StateMismatch(_)));
}

#[test]
fn kinetic_energy_particles_and_bodies() {
    let mut b = ModelBuilder::new();
    b.add_particle(Vec3::ZERO, Vec3::X * 2.0, 1.0, 0.0).unwrap();
    b.add_body(BodyDesc::sphere(1.0, 1.0).with_velocity(Vec3::ZERO, Vec3::Z))
        .unwrap();
    let model = b.finalize().unwrap();
    let state = model.state();
    // 0.5·1·4 + 0.5·0.4·1
    assert!((state.kinetic_energy(&model) - 2.2).abs() < 1e-5);
}

#[test]
fn control_zeros_and_validate() {
    let mut b = unit_triangle();
    b.add_triangle(0, 1, 2, TriangleMaterial::default()).unwrap();
    let model = b.finalize().unwrap();
    let mut control = model.control();
    assert_eq!(control.triangle_activations, vec![0.0]);
    assert!(control.validate(&model).is_ok());
    control.triangle_activations[0] = 0.5;
    control.clear();
    assert_eq!(control.triangle_activations, vec![0.0]);
    control.tet_activations.push(1.0);
    assert!(control.validate(&model).is_err());
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn cloth_grid_counts() {
    let mut b = ModelBuilder::new();
    let grid = ClothGrid {
        cols: 4,
        rows: 3,
        bending: Some((1.0, 0.0)),
        fixed: vec![0, 4],
        ..Default::default()
    };
    let ranges = add_cloth_grid(&mut b, &grid).unwrap();
    assert_eq!(ranges.particles, 0..20);
    assert_eq!(ranges.triangles, 0..24);
    // Interior edges: 4·3 diagonals + 3·3 vertical + 4·2 horizontal
    assert_eq!(ranges.bending_edges, 29);
    let model = b.finalize().unwrap();
    assert!(!model.particle_flags[0].is_active());
    assert!(!model.particle_flags[4].is_active());
    assert!(model.particle_flags[5].is_active());
    assert!(model.bending_edges.iter().all(|e| e.rest_angle.abs() < 1e-3));
}

#[test]
fn cloth_grid_rotation() {
    let mut b = ModelBuilder::new();
    let grid = ClothGrid {
        cols: 1,
        rows: 1,
        cell_width: 1.0,
        cell_height: 1.0,
        rotation: Quat::from_axis_angle(Vec3::X, std::f32::consts::FRAC_PI_2),
        origin: Vec3::Y * 2.0,
        ..Default::default()
    };
    add_cloth_grid(&mut b, &grid).unwrap();
    let model = b.finalize().unwrap();
    // Row direction (−Y local) becomes −Z after rotating about X
    assert!((model.particle_positions[2] - Vec3::new(0.0, 2.0, -1.0)).length() < 1e-5);
}

#[test]
fn soft_block_counts_and_volume() {
    let mut b = ModelBuilder::new();
    let block = SoftBlock {
        cells: [2, 1, 1],
        cell_size: 0.5,
        ..Default::default()
    };
    let ranges = add_soft_block(&mut b, &block).unwrap();
    assert_eq!(ranges.particles.len(), 12);
    assert_eq!(ranges.tetrahedra, 0..12);
    let model = b.finalize().unwrap();
    let volume: f32 = model.tetrahedra.iter().map(|t| t.rest_volume).sum();
    assert!((volume - 2.0 * 0.125).abs() < 1e-5);
}
