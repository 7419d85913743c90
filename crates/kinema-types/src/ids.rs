//! Strongly-typed identifiers for simulation entities.
//!
//! The model builder hands these out so callers cannot mix a particle
//! index with a body index. Inside the solver, arrays are indexed by the
//! raw `usize` returned from [`index`](ParticleId::index).

use serde::{Deserialize, Serialize};

/// Index into the particle arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

/// Index into the rigid-body arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Index into the joint array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointId(pub u32);

/// Index into the collision shape array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

impl ParticleId {
    /// Returns the raw index as `usize` for array indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl JointId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ShapeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for ParticleId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for BodyId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for ShapeId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
