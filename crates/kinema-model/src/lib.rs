//! # kinema-model
//!
//! Static model description and per-step data for the Kinema engine.
//!
//! ## Key Types
//!
//! - [`Model`]: Immutable-during-step topology, rest data and coefficients
//! - [`ModelBuilder`]: Incremental construction with fail-fast validation
//! - [`State`]: Positions, velocities and force accumulators
//! - [`Control`]: Joint targets, feed-forward forces and activations
//! - [`Topology`]: Edge adjacency for bending hinge generation

pub mod builder;
pub mod control;
pub mod elements;
pub mod generators;
pub mod model;
pub mod state;
pub mod topology;

pub use builder::{BodyDesc, JointDesc, ModelBuilder};
pub use control::Control;
pub use elements::{
    AnisotropicStiffness, BendingEdge, Body, ContactMaterial, Joint, JointAxis, JointKind,
    JointMode, Muscle, MuscleWaypoint, ParticleContactParams, Shape, ShapeGeometry,
    SoftContactParams, Spring, TetMaterial, Tetrahedron, Triangle, TriangleContactParams,
    TriangleMaterial,
};
pub use model::Model;
pub use state::State;
pub use topology::{InteriorEdge, Topology};
