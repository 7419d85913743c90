//! # kinema-contact
//!
//! Contact data consumed by the force evaluators.
//!
//! Contact *generation* is a collaborator concern: any type implementing
//! [`ContactDetector`] can fill a [`Contacts`] buffer before a step. The
//! solver only computes the penalty *response* to the records it is given.
//!
//! ## Key Types
//!
//! - [`RigidContact`]: Shape–shape contact between rigid bodies
//! - [`SoftContact`]: Particle–shape contact
//! - [`Contacts`]: The per-step collection of both
//! - [`GroundPlaneDetector`]: Reference detector against static planes

pub mod contact;
pub mod detector;
pub mod ground_plane;

pub use contact::{Contacts, RigidContact, SoftContact};
pub use detector::ContactDetector;
pub use ground_plane::GroundPlaneDetector;
