//! State snapshot serialization for replay and debugging.
//!
//! A snapshot holds what a [`State`] needs to resume: particle positions
//! and velocities, body poses and twists. Force accumulators are scratch
//! data and are not stored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use kinema_math::{Transform, Twist, Vec3};
use kinema_model::State;
use kinema_types::{KinemaError, KinemaResult};

/// Kinematic state at one step, serialized with `bincode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Step index when the snapshot was taken.
    pub step: u64,
    /// Simulation time in seconds.
    pub sim_time: f64,
    pub particle_positions: Vec<Vec3>,
    pub particle_velocities: Vec<Vec3>,
    pub body_transforms: Vec<Transform>,
    pub body_twists: Vec<Twist>,
}

impl StateSnapshot {
    /// Copy the kinematic arrays out of `state`.
    pub fn capture(step: u64, sim_time: f64, state: &State) -> Self {
        Self {
            step,
            sim_time,
            particle_positions: state.particle_positions.clone(),
            particle_velocities: state.particle_velocities.clone(),
            body_transforms: state.body_transforms.clone(),
            body_twists: state.body_twists.clone(),
        }
    }

    pub fn particle_count(&self) -> usize {
        self.particle_positions.len()
    }

    pub fn body_count(&self) -> usize {
        self.body_transforms.len()
    }

    /// Write the snapshot back into a state of the same layout.
    ///
    /// Force accumulators are cleared.
    pub fn restore(&self, state: &mut State) -> KinemaResult<()> {
        if state.particle_count() != self.particle_count() || state.body_count() != self.body_count() {
            return Err(KinemaError::StateMismatch(format!(
                "snapshot has {} particles and {} bodies, state has {} and {}",
                self.particle_count(),
                self.body_count(),
                state.particle_count(),
                state.body_count()
            )));
        }
        state.particle_positions.copy_from_slice(&self.particle_positions);
        state.particle_velocities.copy_from_slice(&self.particle_velocities);
        state.body_transforms.copy_from_slice(&self.body_transforms);
        state.body_twists.copy_from_slice(&self.body_twists);
        state.clear_forces();
        Ok(())
    }

    /// Largest particle position difference to `other`.
    ///
    /// Body origins are included, so the result is a single drift figure
    /// for replay comparisons.
    pub fn max_position_delta(&self, other: &StateSnapshot) -> KinemaResult<f32> {
        if self.particle_count() != other.particle_count() || self.body_count() != other.body_count() {
            return Err(KinemaError::StateMismatch(
                "cannot compare snapshots of different layouts".into(),
            ));
        }
        let particles = self
            .particle_positions
            .iter()
            .zip(&other.particle_positions)
            .map(|(a, b)| a.distance(*b));
        let bodies = self
            .body_transforms
            .iter()
            .zip(&other.body_transforms)
            .map(|(a, b)| a.p.distance(b.p));
        Ok(particles.chain(bodies).fold(0.0, f32::max))
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> KinemaResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| KinemaError::Serialization(format!("snapshot serialization failed: {e}")))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> KinemaResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| KinemaError::Serialization(format!("snapshot deserialization failed: {e}")))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> KinemaResult<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        tracing::debug!(step = self.step, path = %path.as_ref().display(), "snapshot saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> KinemaResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }
}
