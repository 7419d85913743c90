//! # kinema-types
//!
//! Shared types, identifiers, flag bitmasks, error types and physical
//! constants for the Kinema time-stepping engine.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other Kinema crates share.

pub mod constants;
pub mod error;
pub mod flags;
pub mod ids;

pub use error::{KinemaError, KinemaResult};
pub use flags::{ModelUpdateFlags, ParticleFlags};
pub use ids::{BodyId, JointId, ParticleId, ShapeId};
