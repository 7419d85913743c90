//! Cloth and solid material presets.

use serde::{Deserialize, Serialize};

use kinema_model::{AnisotropicStiffness, TetMaterial, TriangleMaterial};
use kinema_types::{KinemaError, KinemaResult};

/// Warp/weft ratios within this band are treated as isotropic.
const ANISOTROPY_TOLERANCE: f32 = 0.05;

/// Membrane, bending and mass parameters of a fabric.
///
/// | Field | Maps to |
/// |---|---|
/// | `stretch_warp`, `stretch_weft`, `shear` | triangle stiffness (`ke` or anisotropic terms) |
/// | `area` | triangle area stiffness `ka` |
/// | `damping` | triangle strain-rate damping `kd` |
/// | `bend_ke`, `bend_kd` | hinge stiffness and damping |
/// | `areal_density` | particle mass (kg/m²) |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothPreset {
    pub name: String,
    /// Areal density in kg/m².
    pub areal_density: f32,
    pub stretch_warp: f32,
    pub stretch_weft: f32,
    pub shear: f32,
    pub area: f32,
    pub damping: f32,
    pub bend_ke: f32,
    pub bend_kd: f32,
    #[serde(default)]
    pub drag: f32,
    #[serde(default)]
    pub lift: f32,
    /// Coulomb friction against shapes.
    pub friction: f32,
}

impl ClothPreset {
    /// True if warp and weft stiffness differ by more than 5%.
    pub fn is_anisotropic(&self) -> bool {
        if self.stretch_weft <= f32::EPSILON {
            return self.stretch_warp > f32::EPSILON;
        }
        (self.stretch_warp / self.stretch_weft - 1.0).abs() > ANISOTROPY_TOLERANCE
    }

    /// Triangle material; anisotropic fabrics carry explicit warp/weft/shear terms.
    pub fn triangle_material(&self) -> TriangleMaterial {
        let anisotropy = self.is_anisotropic().then_some(AnisotropicStiffness {
            warp: self.stretch_warp,
            weft: self.stretch_weft,
            shear: self.shear,
        });
        TriangleMaterial {
            ke: 0.5 * (self.stretch_warp + self.stretch_weft),
            ka: self.area,
            kd: self.damping,
            drag: self.drag,
            lift: self.lift,
            anisotropy,
        }
    }

    /// Hinge stiffness and damping.
    pub fn bending(&self) -> (f32, f32) {
        (self.bend_ke, self.bend_kd)
    }

    /// Mass of one particle when `particle_count` particles cover `area` m².
    pub fn particle_mass(&self, particle_count: usize, area: f32) -> f32 {
        if particle_count == 0 {
            return 0.0;
        }
        self.areal_density * area / particle_count as f32
    }

    pub fn validate(&self) -> KinemaResult<()> {
        let fields = [
            ("areal_density", self.areal_density),
            ("stretch_warp", self.stretch_warp),
            ("stretch_weft", self.stretch_weft),
            ("shear", self.shear),
            ("area", self.area),
            ("damping", self.damping),
            ("bend_ke", self.bend_ke),
            ("bend_kd", self.bend_kd),
            ("drag", self.drag),
            ("lift", self.lift),
            ("friction", self.friction),
        ];
        check_fields(&self.name, &fields)
    }
}

/// Elastic parameters of a volumetric solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidPreset {
    pub name: String,
    /// Volumetric density in kg/m³.
    pub density: f32,
    /// Young's modulus (Pa).
    pub youngs_modulus: f32,
    /// Poisson's ratio, in `[0, 0.5)`.
    pub poisson_ratio: f32,
    pub damping: f32,
}

impl SolidPreset {
    /// Lamé parameters `(μ, λ)`.
    pub fn lame(&self) -> (f32, f32) {
        let e = self.youngs_modulus;
        let nu = self.poisson_ratio;
        let mu = e / (2.0 * (1.0 + nu));
        let lambda = e * nu / ((1.0 + nu) * (1.0 - 2.0 * nu));
        (mu, lambda)
    }

    pub fn tet_material(&self) -> TetMaterial {
        let (k_mu, k_lambda) = self.lame();
        TetMaterial {
            k_mu,
            k_lambda,
            k_damp: self.damping,
        }
    }

    pub fn validate(&self) -> KinemaResult<()> {
        let fields = [
            ("density", self.density),
            ("youngs_modulus", self.youngs_modulus),
            ("damping", self.damping),
        ];
        check_fields(&self.name, &fields)?;
        if !(0.0..0.5).contains(&self.poisson_ratio) {
            return Err(KinemaError::InvalidParameter(format!(
                "material '{}': poisson_ratio must be in [0, 0.5), got {}",
                self.name, self.poisson_ratio
            )));
        }
        Ok(())
    }
}

fn check_fields(name: &str, fields: &[(&str, f32)]) -> KinemaResult<()> {
    for &(field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(KinemaError::InvalidParameter(format!(
                "material '{name}': {field} must be finite and non-negative, got {value}"
            )));
        }
    }
    Ok(())
}
