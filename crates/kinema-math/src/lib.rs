//! # kinema-math
//!
//! Linear algebra primitives for the Kinema time-stepping engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Mat3`, `Quat`, etc.)
//! - [`Transform`], [`Twist`] and [`Wrench`] for rigid-body poses,
//!   velocities and force accumulators
//! - 3×2 matrix type for triangle deformation gradients
//! - Geometric kernels shared by the model builder and the force
//!   evaluators (dihedral angle gradient, closest point on triangle)
//! - Smooth norms used by friction models

pub mod decomposition;
pub mod geometry;
pub mod mat3x2;
pub mod norms;
pub mod spatial;

// Re-export glam types as the canonical math types for Kinema.
pub use glam::{Mat2, Mat3, Quat, Vec2, Vec3, Vec4};

pub use mat3x2::Mat3x2;
pub use spatial::{Transform, Twist, Wrench};
