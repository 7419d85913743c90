//! Element records stored in a [`Model`](crate::Model).
//!
//! Every record refers to particles or bodies by index. Index
//! consistency is checked once by [`ModelBuilder`](crate::ModelBuilder)
//! and never again during stepping.

use serde::{Deserialize, Serialize};

use kinema_math::{Mat2, Mat3, Transform, Vec3};
use kinema_types::BodyId;

/// A damped spring between two particles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub indices: [u32; 2],
    pub rest_length: f32,
    /// Stiffness (N/m).
    pub ke: f32,
    /// Damping along the spring axis (N·s/m).
    pub kd: f32,
}

/// Warp/weft/shear stiffness for anisotropic woven membranes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnisotropicStiffness {
    /// Stretch stiffness along the first rest axis.
    pub warp: f32,
    /// Stretch stiffness along the second rest axis.
    pub weft: f32,
    /// In-plane shear stiffness.
    pub shear: f32,
}

/// Constitutive parameters of a membrane triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangleMaterial {
    /// Shear stiffness (μ).
    pub ke: f32,
    /// Area preservation stiffness (λ).
    pub ka: f32,
    /// Strain-rate damping.
    pub kd: f32,
    /// Aerodynamic drag coefficient.
    pub drag: f32,
    /// Aerodynamic lift coefficient.
    pub lift: f32,
    /// Replaces the isotropic shear term when present.
    pub anisotropy: Option<AnisotropicStiffness>,
}

impl Default for TriangleMaterial {
    fn default() -> Self {
        Self {
            ke: 100.0,
            ka: 100.0,
            kd: 10.0,
            drag: 0.0,
            lift: 0.0,
            anisotropy: None,
        }
    }
}

/// A membrane triangle with its rest metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [u32; 3],
    /// Inverse of the 2×2 rest edge matrix in the triangle's local frame.
    pub dm_inv: Mat2,
    pub rest_area: f32,
    pub material: TriangleMaterial,
}

/// A bending hinge across an interior edge.
///
/// `indices` is `[wing_a, wing_b, edge_v0, edge_v1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendingEdge {
    pub indices: [u32; 4],
    /// Signed rest dihedral angle (radians).
    pub rest_angle: f32,
    pub ke: f32,
    pub kd: f32,
}

/// Lamé parameters and damping of a tetrahedron.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TetMaterial {
    /// First Lamé parameter μ (shear).
    pub k_mu: f32,
    /// Second Lamé parameter λ (volume).
    pub k_lambda: f32,
    pub k_damp: f32,
}

impl Default for TetMaterial {
    fn default() -> Self {
        Self {
            k_mu: 1.0e3,
            k_lambda: 1.0e3,
            k_damp: 0.0,
        }
    }
}

/// A linear tetrahedral finite element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tetrahedron {
    pub indices: [u32; 4],
    /// Inverse of the rest shape matrix `[x1-x0, x2-x0, x3-x0]`.
    pub dm_inv: Mat3,
    pub rest_volume: f32,
    pub material: TetMaterial,
}

/// Rigid body mass properties and initial conditions.
///
/// `transform` places the body origin; the centre of mass sits at
/// `com` in body coordinates. Inertia is expressed about the centre of
/// mass in the body frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub transform: Transform,
    pub angular_velocity: Vec3,
    pub linear_velocity: Vec3,
    pub com: Vec3,
    pub mass: f32,
    pub inv_mass: f32,
    pub inertia: Mat3,
    pub inv_inertia: Mat3,
}

impl Body {
    /// True for bodies with zero inverse mass.
    #[inline]
    pub fn is_kinematic(&self) -> bool {
        self.inv_mass == 0.0
    }
}

/// Joint kinds supported by the penalty joint model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointKind {
    /// No coupling.
    Free,
    /// All six degrees of freedom locked.
    Fixed,
    /// Translation along the axis only.
    Prismatic,
    /// Rotation about the axis only.
    Revolute,
    /// Position attachment, free rotation.
    Ball,
}

impl JointKind {
    /// Number of driven axes.
    pub fn axis_count(self) -> usize {
        match self {
            JointKind::Prismatic | JointKind::Revolute => 1,
            JointKind::Free | JointKind::Fixed | JointKind::Ball => 0,
        }
    }
}

/// How the axis drive interprets its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointMode {
    /// Target is ignored.
    #[default]
    None,
    /// Target is a coordinate (m or rad).
    Position,
    /// Target is a coordinate rate.
    Velocity,
}

/// Drive and limit parameters for a joint axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointAxis {
    /// Axis in the parent joint frame.
    pub axis: Vec3,
    pub mode: JointMode,
    pub target_ke: f32,
    pub target_kd: f32,
    pub limit_lower: f32,
    pub limit_upper: f32,
    pub limit_ke: f32,
    pub limit_kd: f32,
}

impl Default for JointAxis {
    fn default() -> Self {
        Self {
            axis: Vec3::X,
            mode: JointMode::None,
            target_ke: 0.0,
            target_kd: 0.0,
            limit_lower: f32::NEG_INFINITY,
            limit_upper: f32::INFINITY,
            limit_ke: 100.0,
            limit_kd: 10.0,
        }
    }
}

/// A penalty joint between a parent body (or the world) and a child body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub kind: JointKind,
    /// `None` attaches the child to the world.
    pub parent: Option<BodyId>,
    pub child: BodyId,
    /// Joint frame relative to the parent body (or world).
    pub parent_frame: Transform,
    /// Joint frame relative to the child body.
    pub child_frame: Transform,
    pub axis: JointAxis,
}

/// Collision geometry. Planes have their normal along local +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeGeometry {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
    Capsule { radius: f32, half_height: f32 },
    Plane,
}

/// Penalty contact coefficients of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactMaterial {
    /// Normal stiffness.
    pub ke: f32,
    /// Normal damping.
    pub kd: f32,
    /// Friction stiffness.
    pub kf: f32,
    /// Adhesion distance.
    pub ka: f32,
    /// Coulomb friction coefficient.
    pub mu: f32,
}

impl Default for ContactMaterial {
    fn default() -> Self {
        Self {
            ke: 1.0e5,
            kd: 1.0e3,
            kf: 1.0e3,
            ka: 0.0,
            mu: 0.5,
        }
    }
}

impl ContactMaterial {
    /// Arithmetic mean of two materials.
    pub fn average(&self, other: &Self) -> Self {
        Self {
            ke: 0.5 * (self.ke + other.ke),
            kd: 0.5 * (self.kd + other.kd),
            kf: 0.5 * (self.kf + other.kf),
            ka: 0.5 * (self.ka + other.ka),
            mu: 0.5 * (self.mu + other.mu),
        }
    }
}

/// A collision shape attached to a body, or static when `body` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub body: Option<BodyId>,
    /// Shape frame relative to the body origin (or world).
    pub transform: Transform,
    pub geometry: ShapeGeometry,
    pub material: ContactMaterial,
}

/// One attachment point of a muscle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuscleWaypoint {
    pub body: BodyId,
    /// Attachment point in body coordinates.
    pub point: Vec3,
}

/// A line-of-action actuator routed through body-fixed waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Muscle {
    pub waypoints: Vec<MuscleWaypoint>,
    /// Force at full activation (N).
    pub max_force: f32,
}

/// Global particle–particle contact coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleContactParams {
    pub ke: f32,
    pub kd: f32,
    pub kf: f32,
    pub mu: f32,
    /// Separation below which attraction still acts.
    pub cohesion: f32,
    /// Adhesion distance used against shapes.
    pub adhesion: f32,
}

impl Default for ParticleContactParams {
    fn default() -> Self {
        Self {
            ke: 1.0e3,
            kd: 1.0e2,
            kf: 1.0e2,
            mu: 0.5,
            cohesion: 0.0,
            adhesion: 0.0,
        }
    }
}

/// Particle–shape contact coefficients, averaged with the shape material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoftContactParams {
    pub ke: f32,
    pub kd: f32,
    pub kf: f32,
    pub mu: f32,
    /// Contacts beyond this separation produce no force.
    pub margin: f32,
}

impl Default for SoftContactParams {
    fn default() -> Self {
        Self {
            ke: 1.0e3,
            kd: 10.0,
            kf: 1.0e3,
            mu: 0.5,
            margin: 0.2,
        }
    }
}

impl SoftContactParams {
    /// Particle side of a particle–shape contact, with `adhesion` as the
    /// adhesion distance.
    pub fn particle_material(&self, adhesion: f32) -> ContactMaterial {
        ContactMaterial {
            ke: self.ke,
            kd: self.kd,
            kf: self.kf,
            ka: adhesion,
            mu: self.mu,
        }
    }
}

/// Particle–triangle self-contact coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangleContactParams {
    /// Penetration depth measured from this offset above the surface.
    pub distance: f32,
    pub ke: f32,
}

impl Default for TriangleContactParams {
    fn default() -> Self {
        Self {
            distance: 0.01,
            ke: 1.0e5,
        }
    }
}
