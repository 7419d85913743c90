//! Material library with built-in presets.

use std::collections::BTreeMap;

use serde::Deserialize;

use kinema_types::{KinemaError, KinemaResult};

use crate::presets::{ClothPreset, SolidPreset};

/// A named collection of material presets.
///
/// Names are kept sorted, so listings are stable.
#[derive(Debug, Clone)]
pub struct MaterialLibrary {
    cloth: BTreeMap<String, ClothPreset>,
    solid: BTreeMap<String, SolidPreset>,
}

/// On-disk layout of a material file.
#[derive(Debug, Default, Deserialize)]
struct LibraryFile {
    #[serde(default)]
    cloth: Vec<ClothPreset>,
    #[serde(default)]
    solid: Vec<SolidPreset>,
}

impl MaterialLibrary {
    /// Creates a library with the built-in presets.
    pub fn with_defaults() -> Self {
        let mut lib = Self::empty();
        for preset in [cotton(), silk(), denim(), jersey(), chiffon()] {
            lib.cloth.insert(preset.name.clone(), preset);
        }
        for preset in [rubber(), gel(), foam()] {
            lib.solid.insert(preset.name.clone(), preset);
        }
        lib
    }

    pub fn empty() -> Self {
        Self {
            cloth: BTreeMap::new(),
            solid: BTreeMap::new(),
        }
    }

    /// Parses presets from TOML with `[[cloth]]` and `[[solid]]` tables.
    ///
    /// Every preset is validated before it is accepted.
    pub fn from_toml(text: &str) -> KinemaResult<Self> {
        let file: LibraryFile = toml::from_str(text)
            .map_err(|e| KinemaError::Serialization(format!("material library: {e}")))?;
        let mut lib = Self::empty();
        for preset in file.cloth {
            lib.register_cloth(preset)?;
        }
        for preset in file.solid {
            lib.register_solid(preset)?;
        }
        Ok(lib)
    }

    /// Adds every preset of `other`, replacing presets with the same name.
    pub fn merge(&mut self, other: MaterialLibrary) {
        self.cloth.extend(other.cloth);
        self.solid.extend(other.solid);
    }

    /// Registers a cloth preset. Overwrites if the name already exists.
    pub fn register_cloth(&mut self, preset: ClothPreset) -> KinemaResult<()> {
        preset.validate()?;
        self.cloth.insert(preset.name.clone(), preset);
        Ok(())
    }

    /// Registers a solid preset. Overwrites if the name already exists.
    pub fn register_solid(&mut self, preset: SolidPreset) -> KinemaResult<()> {
        preset.validate()?;
        self.solid.insert(preset.name.clone(), preset);
        Ok(())
    }

    pub fn cloth(&self, name: &str) -> Option<&ClothPreset> {
        self.cloth.get(name)
    }

    pub fn solid(&self, name: &str) -> Option<&SolidPreset> {
        self.solid.get(name)
    }

    /// Cloth preset names in sorted order.
    pub fn cloth_names(&self) -> Vec<&str> {
        self.cloth.keys().map(String::as_str).collect()
    }

    pub fn solid_names(&self) -> Vec<&str> {
        self.solid.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.cloth.len() + self.solid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cloth.is_empty() && self.solid.is_empty()
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── Built-in Cloth Presets ───────────────────────────────────────────

/// Medium-weight woven cotton. Holds defined folds.
fn cotton() -> ClothPreset {
    ClothPreset {
        name: "cotton".into(),
        areal_density: 0.20,
        stretch_warp: 1.2e3,
        stretch_weft: 1.1e3,
        shear: 2.0e2,
        area: 1.0e3,
        damping: 1.0,
        bend_ke: 5.0e-3,
        bend_kd: 1.0e-4,
        drag: 0.0,
        lift: 0.0,
        friction: 0.5,
    }
}

/// Lightweight silk. Soft drape with many small folds.
fn silk() -> ClothPreset {
    ClothPreset {
        name: "silk".into(),
        areal_density: 0.08,
        stretch_warp: 6.0e2,
        stretch_weft: 6.0e2,
        shear: 1.0e2,
        area: 5.0e2,
        damping: 0.5,
        bend_ke: 5.0e-4,
        bend_kd: 1.0e-5,
        drag: 0.1,
        lift: 0.1,
        friction: 0.3,
    }
}

/// Heavy denim. Resists deformation, sharp creases.
fn denim() -> ClothPreset {
    ClothPreset {
        name: "denim".into(),
        areal_density: 0.40,
        stretch_warp: 3.0e3,
        stretch_weft: 2.4e3,
        shear: 6.0e2,
        area: 2.5e3,
        damping: 2.0,
        bend_ke: 2.0e-2,
        bend_kd: 5.0e-4,
        drag: 0.0,
        lift: 0.0,
        friction: 0.6,
    }
}

/// Stretchy knit; weft stiffer than warp.
fn jersey() -> ClothPreset {
    ClothPreset {
        name: "jersey".into(),
        areal_density: 0.18,
        stretch_warp: 2.0e2,
        stretch_weft: 3.0e2,
        shear: 5.0e1,
        area: 2.0e2,
        damping: 0.5,
        bend_ke: 1.0e-3,
        bend_kd: 2.0e-5,
        drag: 0.0,
        lift: 0.0,
        friction: 0.4,
    }
}

/// Ultra-light sheer fabric with strong aerodynamic response.
fn chiffon() -> ClothPreset {
    ClothPreset {
        name: "chiffon".into(),
        areal_density: 0.05,
        stretch_warp: 4.0e2,
        stretch_weft: 4.0e2,
        shear: 8.0e1,
        area: 3.0e2,
        damping: 0.2,
        bend_ke: 1.0e-4,
        bend_kd: 2.0e-6,
        drag: 0.5,
        lift: 0.5,
        friction: 0.2,
    }
}

// ─── Built-in Solid Presets ───────────────────────────────────────────

fn rubber() -> SolidPreset {
    SolidPreset {
        name: "rubber".into(),
        density: 1100.0,
        youngs_modulus: 1.0e5,
        poisson_ratio: 0.45,
        damping: 1.0,
    }
}

fn gel() -> SolidPreset {
    SolidPreset {
        name: "gel".into(),
        density: 1000.0,
        youngs_modulus: 1.0e4,
        poisson_ratio: 0.40,
        damping: 0.5,
    }
}

fn foam() -> SolidPreset {
    SolidPreset {
        name: "foam".into(),
        density: 50.0,
        youngs_modulus: 5.0e3,
        poisson_ratio: 0.1,
        damping: 0.2,
    }
}
