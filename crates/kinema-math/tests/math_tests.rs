//! Integration tests for kinema-math.

use kinema_math::decomposition::{polar_rotation, trace};
use kinema_math::geometry::{closest_point_barycentric, dihedral_gradient};
use kinema_math::mat3x2::{deformation_gradient, Mat3x2};
use kinema_math::norms::{norm_huber, normalize_or_zero};
use kinema_math::{Mat2, Mat3, Quat, Transform, Twist, Vec3, Wrench};

fn vec_close(a: Vec3, b: Vec3, tol: f32) -> bool {
    (a - b).length() < tol
}

// ─── Mat3x2 Tests ─────────────────────────────────────────────

#[test]
fn frobenius_norm_identity() {
    assert!((Mat3x2::IDENTITY.frobenius_norm_sq() - 2.0).abs() < 1e-6);
    assert_eq!(Mat3x2::ZERO.frobenius_norm_sq(), 0.0);
}

#[test]
fn mul_mat2_identity() {
    let f = Mat3x2::from_cols(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
    assert_eq!(f.mul_mat2(Mat2::IDENTITY), f);
}

#[test]
fn mul_mat2_transpose_swaps_off_diagonal() {
    let f = Mat3x2::from_cols(Vec3::X, Vec3::Y);
    let m = Mat2::from_cols_array(&[1.0, 2.0, 3.0, 4.0]);
    let a = f.mul_mat2_transpose(m);
    let b = f.mul_mat2(m.transpose());
    assert_eq!(a, b);
    // col0 = X*m00 + Y*m01 (row 0 of m)
    assert!(vec_close(a.col0, Vec3::new(1.0, 3.0, 0.0), 1e-6));
}

#[test]
fn deformation_gradient_at_rest_is_identity() {
    let f = deformation_gradient(Vec3::ZERO, Vec3::X, Vec3::Y, Mat2::IDENTITY);
    assert_eq!(f, Mat3x2::IDENTITY);
}

#[test]
fn deformation_gradient_stretch() {
    let f = deformation_gradient(Vec3::ZERO, Vec3::X * 2.0, Vec3::Y, Mat2::IDENTITY);
    assert!((f.col0.length() - 2.0).abs() < 1e-6);
    assert!((f.col1.length() - 1.0).abs() < 1e-6);
}

// ─── Spatial Tests ────────────────────────────────────────────

#[test]
fn transform_inverse_roundtrip() {
    let t = Transform::new(
        Vec3::new(1.0, 2.0, 3.0),
        Quat::from_axis_angle(Vec3::Z, 0.7),
    );
    let x = Vec3::new(-0.5, 0.25, 2.0);
    let back = t.inverse().transform_point(t.transform_point(x));
    assert!(vec_close(back, x, 1e-5));
}

#[test]
fn transform_composition() {
    let a = Transform::new(Vec3::X, Quat::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2));
    let b = Transform::from_translation(Vec3::X);
    let ab = a * b;
    // Rotating X by 90° about Z gives Y, then offset by a.p
    assert!(vec_close(ab.p, Vec3::new(1.0, 1.0, 0.0), 1e-6));
    assert!(vec_close(ab.transform_point(Vec3::ZERO), a.transform_point(b.p), 1e-6));
}

#[test]
fn twist_point_velocity() {
    let t = Twist::new(Vec3::Z, Vec3::X);
    let v = t.point_velocity(Vec3::X);
    assert!(vec_close(v, Vec3::new(1.0, 1.0, 0.0), 1e-6));
}

#[test]
fn wrench_from_force_at_lever() {
    let w = Wrench::from_force_at(Vec3::X, Vec3::Y);
    assert!(vec_close(w.torque, Vec3::Z, 1e-6));
    let n = -w;
    assert!(vec_close(n.force, -Vec3::Y, 1e-6));
}

#[test]
fn transform_serde_roundtrip() {
    let t = Transform::new(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY);
    let json = serde_json::to_string(&t).unwrap();
    let back: Transform = serde_json::from_str(&json).unwrap();
    assert_eq!(t, back);
}

// ─── Norm Tests ───────────────────────────────────────────────

#[test]
fn huber_quadratic_below_delta() {
    let v = Vec3::new(0.5, 0.0, 0.0);
    assert!((norm_huber(v, 1.0) - 0.125).abs() < 1e-6);
}

#[test]
fn huber_linear_above_delta() {
    let v = Vec3::new(3.0, 0.0, 0.0);
    assert!((norm_huber(v, 1.0) - 2.5).abs() < 1e-6);
}

#[test]
fn huber_continuous_at_transition() {
    let delta = 0.2;
    let below = norm_huber(Vec3::X * (delta - 1e-4), delta);
    let above = norm_huber(Vec3::X * (delta + 1e-4), delta);
    assert!((below - above).abs() < 1e-3);
}

#[test]
fn normalize_or_zero_short_vector() {
    assert_eq!(normalize_or_zero(Vec3::ZERO, 1e-6), Vec3::ZERO);
    assert!(vec_close(normalize_or_zero(Vec3::X * 3.0, 1e-6), Vec3::X, 1e-6));
}

// ─── Dihedral Tests ───────────────────────────────────────────

fn flat_hinge() -> (Vec3, Vec3, Vec3, Vec3) {
    (
        Vec3::new(0.5, 1.0, 0.0),
        Vec3::new(0.5, -1.0, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
    )
}

#[test]
fn dihedral_flat_is_zero() {
    let (x1, x2, x3, x4) = flat_hinge();
    let d = dihedral_gradient(x1, x2, x3, x4).unwrap();
    assert!(d.angle.abs() < 1e-5);
    assert!((d.edge_length - 1.0).abs() < 1e-6);
}

#[test]
fn dihedral_sign_follows_fold_direction() {
    let (x1, x2, x3, x4) = flat_hinge();
    let up = dihedral_gradient(x1 + Vec3::Z * 0.3, x2, x3, x4).unwrap();
    let down = dihedral_gradient(x1 - Vec3::Z * 0.3, x2, x3, x4).unwrap();
    assert!(up.angle > 0.0);
    assert!(down.angle < 0.0);
    assert!((up.angle + down.angle).abs() < 1e-5);
}

#[test]
fn dihedral_gradient_sums_to_zero() {
    let (x1, x2, x3, x4) = flat_hinge();
    let d = dihedral_gradient(x1 + Vec3::new(0.1, 0.0, 0.4), x2, x3, x4).unwrap();
    let sum: Vec3 = d.grad.iter().copied().sum();
    assert!(sum.length() < 1e-5);
}

#[test]
fn dihedral_degenerate_edge() {
    let p = Vec3::ZERO;
    assert!(dihedral_gradient(Vec3::Y, -Vec3::Y, p, p).is_none());
}

// ─── Closest Point Tests ──────────────────────────────────────

#[test]
fn closest_point_interior() {
    let b = closest_point_barycentric(
        Vec3::ZERO,
        Vec3::X,
        Vec3::Y,
        Vec3::new(0.25, 0.25, 1.0),
    );
    assert!(vec_close(b, Vec3::new(0.5, 0.25, 0.25), 1e-6));
}

#[test]
fn closest_point_vertex_region() {
    let b = closest_point_barycentric(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(-1.0, -1.0, 0.0));
    assert!(vec_close(b, Vec3::new(1.0, 0.0, 0.0), 1e-6));
}

#[test]
fn closest_point_edge_region() {
    let b = closest_point_barycentric(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(0.5, -1.0, 0.0));
    assert!(vec_close(b, Vec3::new(0.5, 0.5, 0.0), 1e-6));
    assert!((b.x + b.y + b.z - 1.0).abs() < 1e-6);
}

// ─── Polar Decomposition Tests ────────────────────────────────

#[test]
fn polar_of_rotation_is_itself() {
    let r = Mat3::from_quat(Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), 0.9));
    let p = polar_rotation(r);
    assert!(p.abs_diff_eq(r, 1e-4));
}

#[test]
fn polar_removes_stretch() {
    let r = Mat3::from_quat(Quat::from_axis_angle(Vec3::Z, 0.4));
    let s = Mat3::from_diagonal(Vec3::new(2.0, 1.5, 0.5));
    let p = polar_rotation(r * s);
    assert!(p.abs_diff_eq(r, 1e-4));
    assert!((p.determinant() - 1.0).abs() < 1e-4);
}

#[test]
fn polar_singular_is_identity() {
    assert_eq!(polar_rotation(Mat3::ZERO), Mat3::IDENTITY);
}

#[test]
fn trace_identity() {
    assert!((trace(Mat3::IDENTITY) - 3.0).abs() < 1e-6);
}
