//! Geometric kernels shared by the model builder and the force evaluators.

use glam::Vec3;
use kinema_types::constants::DEGENERATE_LENGTH;

/// Signed dihedral angle and its gradient for a pair of triangles.
///
/// For an interior edge `(x3, x4)` with wing vertices `x1` and `x2`:
/// ```text
///        x1
///       / \
///      /   \
///    x3 ─── x4
///      \   /
///       \ /
///        x2
/// ```
/// The angle is zero for a flat configuration and changes sign when the
/// wings fold through each other.
#[derive(Debug, Clone, Copy)]
pub struct DihedralGradient {
    /// Signed bending angle (radians).
    pub angle: f32,
    /// Bending directions for `[x1, x2, x3, x4]`. They sum to zero.
    pub grad: [Vec3; 4],
    /// Length of the shared edge.
    pub edge_length: f32,
}

/// Compute the signed dihedral angle and the Bridson bending directions.
///
/// Returns `None` for degenerate triangles or a collapsed shared edge.
pub fn dihedral_gradient(x1: Vec3, x2: Vec3, x3: Vec3, x4: Vec3) -> Option<DihedralGradient> {
    let n1 = (x3 - x1).cross(x4 - x1);
    let n2 = (x4 - x2).cross(x3 - x2);

    let n1_length = n1.length();
    let n2_length = n2.length();
    if n1_length < DEGENERATE_LENGTH || n2_length < DEGENERATE_LENGTH {
        return None;
    }

    let e = x4 - x3;
    let edge_length = e.length();
    if edge_length < DEGENERATE_LENGTH {
        return None;
    }
    let e_hat = e / edge_length;

    let cos_theta = (n1.dot(n2) / (n1_length * n2_length)).clamp(-1.0, 1.0);

    // Area-weighted normals: N / |N|²
    let n1 = n1 / (n1_length * n1_length);
    let n2 = n2 / (n2_length * n2_length);

    let s = n2.cross(n1).dot(e_hat).signum();
    let angle = cos_theta.acos() * s;

    let d1 = n1 * edge_length;
    let d2 = n2 * edge_length;
    let d3 = n1 * (x1 - x4).dot(e_hat) + n2 * (x2 - x4).dot(e_hat);
    let d4 = n1 * (x3 - x1).dot(e_hat) + n2 * (x3 - x2).dot(e_hat);

    Some(DihedralGradient {
        angle,
        grad: [d1, d2, d3, d4],
        edge_length,
    })
}

/// Barycentric coordinates of the point on triangle `(a, b, c)` closest to `p`.
///
/// Handles the vertex, edge and face regions, so the result always lies
/// on the closed triangle and the coordinates sum to one.
pub fn closest_point_barycentric(a: Vec3, b: Vec3, c: Vec3, p: Vec3) -> Vec3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return Vec3::new(1.0, 0.0, 0.0);
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return Vec3::new(0.0, 1.0, 0.0);
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return Vec3::new(1.0 - v, v, 0.0);
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return Vec3::new(0.0, 0.0, 1.0);
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return Vec3::new(1.0 - w, 0.0, w);
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return Vec3::new(0.0, 1.0 - w, w);
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    Vec3::new(1.0 - v - w, v, w)
}
