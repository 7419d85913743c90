//! Per-step actuation inputs.

use serde::{Deserialize, Serialize};

use kinema_types::{KinemaError, KinemaResult};

use crate::model::Model;

/// Time-varying inputs read by the force evaluators.
///
/// All arrays are zero for a neutral control: no joint drive target,
/// no feed-forward force and no activation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Drive target per joint axis (position or velocity per axis mode).
    pub joint_targets: Vec<f32>,
    /// Feed-forward generalized force per joint axis.
    pub joint_forces: Vec<f32>,
    /// Area activation per triangle.
    pub triangle_activations: Vec<f32>,
    /// Volume activation per tetrahedron.
    pub tet_activations: Vec<f32>,
    /// Activation in `[0, 1]` per muscle.
    pub muscle_activations: Vec<f32>,
}

impl Control {
    /// Creates a neutral control sized for `model`.
    pub fn zeros(model: &Model) -> Self {
        let axes = model.joint_axis_count();
        Self {
            joint_targets: vec![0.0; axes],
            joint_forces: vec![0.0; axes],
            triangle_activations: vec![0.0; model.triangle_count()],
            tet_activations: vec![0.0; model.tetrahedron_count()],
            muscle_activations: vec![0.0; model.muscle_count()],
        }
    }

    /// Reset every input to its neutral value.
    pub fn clear(&mut self) {
        for v in [
            &mut self.joint_targets,
            &mut self.joint_forces,
            &mut self.triangle_activations,
            &mut self.tet_activations,
            &mut self.muscle_activations,
        ] {
            v.fill(0.0);
        }
    }

    /// Checks that every array matches the model's element counts.
    pub fn validate(&self, model: &Model) -> KinemaResult<()> {
        let axes = model.joint_axis_count();
        let expected = [
            ("joint_targets", self.joint_targets.len(), axes),
            ("joint_forces", self.joint_forces.len(), axes),
            ("triangle_activations", self.triangle_activations.len(), model.triangle_count()),
            ("tet_activations", self.tet_activations.len(), model.tetrahedron_count()),
            ("muscle_activations", self.muscle_activations.len(), model.muscle_count()),
        ];
        for (name, got, want) in expected {
            if got != want {
                return Err(KinemaError::StateMismatch(format!(
                    "control {name} has {got} entries, model expects {want}"
                )));
            }
        }
        Ok(())
    }
}
