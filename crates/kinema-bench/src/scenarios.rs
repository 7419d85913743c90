//! Benchmark scenarios: a finalized model, solver configuration and step
//! schedule for each test case.
//!
//! 1. **Hanging cloth**: Cotton sheet pinned along its top edge
//! 2. **Pendulum chain**: Revolute-jointed links hanging from the world
//! 3. **Soft block**: Tetrahedral gel block dropped on the ground
//! 4. **Box drop**: Rigid box dropped on the ground

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use kinema_material::{ClothPreset, MaterialLibrary, SolidPreset};
use kinema_math::{Quat, Transform, Vec3};
use kinema_model::generators::{add_cloth_grid, add_soft_block, ClothGrid, SoftBlock};
use kinema_model::{
    BodyDesc, ContactMaterial, JointAxis, JointDesc, JointKind, Model, ModelBuilder,
    ShapeGeometry, SoftContactParams,
};
use kinema_solver::{EvaluatorSet, SemiImplicitConfig};
use kinema_types::{KinemaError, KinemaResult};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    HangingCloth,
    PendulumChain,
    SoftBlock,
    BoxDrop,
}

impl ScenarioKind {
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HangingCloth,
            ScenarioKind::PendulumChain,
            ScenarioKind::SoftBlock,
            ScenarioKind::BoxDrop,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingCloth => "hanging_cloth",
            ScenarioKind::PendulumChain => "pendulum_chain",
            ScenarioKind::SoftBlock => "soft_block",
            ScenarioKind::BoxDrop => "box_drop",
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = KinemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioKind::all()
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                KinemaError::InvalidConfig(format!(
                    "unknown scenario '{s}', expected one of: {}",
                    names.join(", ")
                ))
            })
    }
}

/// A fully specified benchmark scenario.
pub struct Scenario {
    pub kind: ScenarioKind,
    pub model: Model,
    /// Solver configuration the scenario was tuned for.
    pub config: SemiImplicitConfig,
    pub timesteps: u32,
    /// Timestep size (seconds).
    pub dt: f32,
    /// Run the ground plane detector before every step.
    pub ground_contacts: bool,
}

/// Ground material shared by the contact scenarios.
///
/// Damping is kept low enough that `kd·dt/m` stays well below one for
/// the lightest particles.
fn ground_material() -> ContactMaterial {
    ContactMaterial {
        ke: 1.0e4,
        kd: 10.0,
        kf: 10.0,
        ka: 0.0,
        mu: 0.5,
    }
}

impl Scenario {
    /// A 1m × 1m cotton sheet at 16×16 resolution hanging in the XY plane,
    /// top row fixed.
    pub fn hanging_cloth() -> KinemaResult<Self> {
        let library = MaterialLibrary::with_defaults();
        let cotton = library
            .cloth("cotton")
            .cloned()
            .ok_or_else(|| KinemaError::InvalidConfig("missing built-in material 'cotton'".into()))?;
        Self::hanging_cloth_with(&cotton)
    }

    /// Hanging cloth using the given fabric.
    pub fn hanging_cloth_with(fabric: &ClothPreset) -> KinemaResult<Self> {
        fabric.validate()?;
        let cells = 16;
        let mut builder = ModelBuilder::new();
        let grid = ClothGrid {
            origin: Vec3::new(-0.5, 1.5, 0.0),
            cols: cells,
            rows: cells,
            cell_width: 1.0 / cells as f32,
            cell_height: 1.0 / cells as f32,
            // Heavier than the areal density alone; keeps the membrane
            // stable at the scenario step size.
            particle_mass: fabric.particle_mass((cells + 1) * (cells + 1), 1.0).max(0.01),
            material: fabric.triangle_material(),
            bending: Some(fabric.bending()),
            fixed: (0..=cells).collect(),
            ..Default::default()
        };
        add_cloth_grid(&mut builder, &grid)?;

        Ok(Self {
            kind: ScenarioKind::HangingCloth,
            model: builder.finalize()?,
            config: SemiImplicitConfig::cloth(),
            timesteps: 600,
            dt: 1.0 / 60.0 / 32.0,
            ground_contacts: false,
        })
    }

    /// Five 0.5m links joined by revolute hinges about Z, the first one
    /// hinged to the world, released horizontally.
    pub fn pendulum_chain() -> KinemaResult<Self> {
        let links = 5;
        let half = 0.25;
        let mut builder = ModelBuilder::new();
        let anchor = Vec3::new(0.0, 3.0, 0.0);

        let mut parent = None;
        for i in 0..links {
            let center = anchor + Vec3::X * (half + 2.0 * half * i as f32);
            let body = builder.add_body(
                BodyDesc::cuboid(1.0, Vec3::new(half, 0.1, 0.1)).at(Transform::from_translation(center)),
            )?;
            let parent_frame = match parent {
                None => Transform::from_translation(anchor),
                Some(_) => Transform::from_translation(Vec3::X * half),
            };
            builder.add_joint(
                JointDesc::new(JointKind::Revolute, parent, body)
                    .with_frames(parent_frame, Transform::from_translation(-Vec3::X * half))
                    .with_axis(JointAxis {
                        axis: Vec3::Z,
                        ..Default::default()
                    }),
            )?;
            parent = Some(body);
        }

        Ok(Self {
            kind: ScenarioKind::PendulumChain,
            model: builder.finalize()?,
            config: SemiImplicitConfig {
                evaluators: EvaluatorSet {
                    body_contacts: false,
                    ..Default::default()
                },
                ..Default::default()
            },
            timesteps: 2000,
            dt: 5.0e-4,
            ground_contacts: false,
        })
    }

    /// A 0.2m gel cube of 4×4×4 cells dropped from 0.3m onto a ground plane.
    pub fn soft_block() -> KinemaResult<Self> {
        let library = MaterialLibrary::with_defaults();
        let gel = library
            .solid("gel")
            .cloned()
            .ok_or_else(|| KinemaError::InvalidConfig("missing built-in material 'gel'".into()))?;
        Self::soft_block_with(&gel)
    }

    /// Soft block using the given solid material.
    pub fn soft_block_with(solid: &SolidPreset) -> KinemaResult<Self> {
        solid.validate()?;
        let cells = 4;
        let cell_size = 0.05;
        let side = cells as f32 * cell_size;
        let particle_count = (cells + 1) * (cells + 1) * (cells + 1);

        let mut builder = ModelBuilder::new();
        builder.soft_contact = SoftContactParams {
            ke: 1.0e4,
            kd: 10.0,
            kf: 10.0,
            mu: 0.5,
            margin: 0.05,
        };
        add_soft_block(
            &mut builder,
            &SoftBlock {
                origin: Vec3::new(-0.5 * side, 0.3, -0.5 * side),
                cells: [cells; 3],
                cell_size,
                particle_mass: solid.density * side.powi(3) / particle_count as f32,
                particle_radius: 0.01,
                material: solid.tet_material(),
                ..Default::default()
            },
        )?;
        builder.add_ground_plane(ground_material())?;

        Ok(Self {
            kind: ScenarioKind::SoftBlock,
            model: builder.finalize()?,
            config: SemiImplicitConfig {
                evaluators: EvaluatorSet {
                    triangle_contacts: false,
                    particles: false,
                    ..Default::default()
                },
                ..Default::default()
            },
            timesteps: 1500,
            dt: 5.0e-4,
            ground_contacts: true,
        })
    }

    /// A 0.2m box, slightly tilted, dropped from 0.5m onto a ground plane.
    pub fn box_drop() -> KinemaResult<Self> {
        let half_extents = Vec3::splat(0.1);
        let mut builder = ModelBuilder::new();
        let body = builder.add_body(BodyDesc::cuboid(1.0, half_extents).at(Transform::new(
            Vec3::new(0.0, 0.5, 0.0),
            Quat::from_rotation_z(0.2),
        )))?;
        builder.add_shape(
            Some(body),
            Transform::IDENTITY,
            ShapeGeometry::Box { half_extents },
            // Near-critical damping once four corners rest on the plane.
            ContactMaterial {
                kd: 190.0,
                ..ground_material()
            },
        )?;
        builder.add_ground_plane(ground_material())?;

        Ok(Self {
            kind: ScenarioKind::BoxDrop,
            model: builder.finalize()?,
            config: SemiImplicitConfig::default(),
            timesteps: 1500,
            dt: 1.0e-3,
            ground_contacts: true,
        })
    }

    pub fn from_kind(kind: ScenarioKind) -> KinemaResult<Self> {
        match kind {
            ScenarioKind::HangingCloth => Self::hanging_cloth(),
            ScenarioKind::PendulumChain => Self::pendulum_chain(),
            ScenarioKind::SoftBlock => Self::soft_block(),
            ScenarioKind::BoxDrop => Self::box_drop(),
        }
    }

    /// Override the number of steps.
    pub fn with_timesteps(mut self, timesteps: u32) -> Self {
        self.timesteps = timesteps;
        self
    }

    /// Override the solver configuration.
    pub fn with_config(mut self, config: SemiImplicitConfig) -> Self {
        self.config = config;
        self
    }

    /// Simulated duration in seconds.
    pub fn duration(&self) -> f64 {
        self.timesteps as f64 * self.dt as f64
    }
}
