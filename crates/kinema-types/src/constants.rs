//! Physical constants and solver defaults.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.81;

/// Default angular damping rate applied to rigid bodies (1/s).
pub const DEFAULT_ANGULAR_DAMPING: f32 = 0.05;

/// Default Huber-norm delta used to smooth friction velocities (m/s).
pub const DEFAULT_FRICTION_SMOOTHING: f32 = 1.0;

/// Default joint attachment stiffness.
pub const DEFAULT_JOINT_ATTACH_KE: f32 = 1.0e4;

/// Default joint attachment damping.
pub const DEFAULT_JOINT_ATTACH_KD: f32 = 1.0e2;

/// Default upper bound on particle speed (m/s).
pub const DEFAULT_PARTICLE_MAX_VELOCITY: f32 = 1.0e5;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-7;

/// Below this length a direction is treated as undefined.
pub const DEGENERATE_LENGTH: f32 = 1.0e-6;

/// Area threshold for degenerate triangle detection.
pub const DEGENERATE_AREA_THRESHOLD: f32 = 1.0e-10;
