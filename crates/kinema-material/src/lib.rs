//! # kinema-material
//!
//! Named material presets for deformable bodies.
//!
//! ## Design
//!
//! A [`ClothPreset`] carries the membrane, bending and mass parameters of a
//! fabric and converts them into the element materials consumed by the
//! model builder. A [`SolidPreset`] does the same for volumetric bodies,
//! converting Young's modulus and Poisson's ratio into Lamé parameters.
//!
//! The [`MaterialLibrary`] stores presets by name and can be extended
//! from TOML.

pub mod library;
pub mod presets;

pub use library::MaterialLibrary;
pub use presets::{ClothPreset, SolidPreset};
