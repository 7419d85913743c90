//! Solver configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use kinema_parallel::BackendKind;
use kinema_types::constants::{
    DEFAULT_ANGULAR_DAMPING, DEFAULT_FRICTION_SMOOTHING, DEFAULT_JOINT_ATTACH_KD,
    DEFAULT_JOINT_ATTACH_KE,
};
use kinema_types::{KinemaError, KinemaResult};

/// Frame in which evaluators express body torques.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyForceFrame {
    /// Torques are taken about the body's world-space centre of mass.
    #[default]
    CenterOfMass,
    /// Torques are taken about the world origin and shifted to the centre
    /// of mass by the integrator.
    WorldOrigin,
}

/// Constitutive model for tetrahedral elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FemModel {
    /// Stable Neo-Hookean (Smith et al. 2018).
    #[default]
    NeoHookean,
    /// Corotational linear elasticity via polar decomposition.
    Corotational,
}

/// One switch per force evaluator.
///
/// Disabled evaluators are left out of the compiled step plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorSet {
    pub springs: bool,
    pub triangles: bool,
    pub triangle_contacts: bool,
    pub bending: bool,
    pub tetrahedra: bool,
    pub joints: bool,
    pub particles: bool,
    pub body_contacts: bool,
    pub particle_body_contacts: bool,
    pub muscles: bool,
}

impl Default for EvaluatorSet {
    fn default() -> Self {
        Self {
            springs: true,
            triangles: true,
            triangle_contacts: true,
            bending: true,
            tetrahedra: true,
            joints: true,
            particles: true,
            body_contacts: true,
            particle_body_contacts: true,
            muscles: false,
        }
    }
}

impl EvaluatorSet {
    /// Every evaluator switched off.
    pub fn none() -> Self {
        Self {
            springs: false,
            triangles: false,
            triangle_contacts: false,
            bending: false,
            tetrahedra: false,
            joints: false,
            particles: false,
            body_contacts: false,
            particle_body_contacts: false,
            muscles: false,
        }
    }
}

/// Configuration for [`SemiImplicitSolver`](crate::SemiImplicitSolver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SemiImplicitConfig {
    /// Angular velocity damping rate (1/s), applied in the integrator.
    pub angular_damping: f32,
    /// Huber transition width (m/s) for smoothed Coulomb friction.
    pub friction_smoothing: f32,
    /// Joint attachment stiffness.
    pub joint_attach_ke: f32,
    /// Joint attachment damping.
    pub joint_attach_kd: f32,
    pub body_force_frame: BodyForceFrame,
    pub fem_model: FemModel,
    pub backend: BackendKind,
    pub evaluators: EvaluatorSet,
}

impl Default for SemiImplicitConfig {
    fn default() -> Self {
        Self {
            angular_damping: DEFAULT_ANGULAR_DAMPING,
            friction_smoothing: DEFAULT_FRICTION_SMOOTHING,
            joint_attach_ke: DEFAULT_JOINT_ATTACH_KE,
            joint_attach_kd: DEFAULT_JOINT_ATTACH_KD,
            body_force_frame: BodyForceFrame::CenterOfMass,
            fem_model: FemModel::NeoHookean,
            backend: BackendKind::Sequential,
            evaluators: EvaluatorSet::default(),
        }
    }
}

impl SemiImplicitConfig {
    /// Single-threaded with every evaluator enabled, muscles included.
    pub fn debug() -> Self {
        Self {
            backend: BackendKind::Sequential,
            evaluators: EvaluatorSet {
                muscles: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Threaded particle-only setup for garment and cloth scenes.
    pub fn cloth() -> Self {
        Self {
            backend: BackendKind::Threaded,
            evaluators: EvaluatorSet {
                tetrahedra: false,
                joints: false,
                body_contacts: false,
                muscles: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Rejects negative or non-finite coefficients.
    pub fn validate(&self) -> KinemaResult<()> {
        let non_negative = [
            ("angular_damping", self.angular_damping),
            ("joint_attach_ke", self.joint_attach_ke),
            ("joint_attach_kd", self.joint_attach_kd),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(KinemaError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.friction_smoothing.is_finite() || self.friction_smoothing <= 0.0 {
            return Err(KinemaError::InvalidConfig(format!(
                "friction_smoothing must be finite and positive, got {}",
                self.friction_smoothing
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> KinemaResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| KinemaError::InvalidConfig(format!("failed to parse solver config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> KinemaResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> KinemaResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| KinemaError::Serialization(format!("failed to write solver config: {e}")))
    }
}
