//! Semi-implicit (symplectic) Euler solver.
//!
//! Every step runs Clear → Accumulate → Integrate:
//!
//! 1. **Validate**: state layout, control, contacts and `dt`. Nothing is
//!    written before validation passes.
//! 2. **Clear**: zero the force and wrench accumulators of the input state.
//! 3. **Accumulate**: replay the force launches of the cached plan.
//! 4. **Integrate**: update velocities from forces, then positions, into
//!    the output state.

use std::time::Instant;

use kinema_contact::Contacts;
use kinema_model::{Control, Model, State};
use kinema_parallel::Backend;
use kinema_types::{KinemaError, KinemaResult, ModelUpdateFlags};

use crate::config::SemiImplicitConfig;
use crate::forces::{self, ForceContext, JointLayout, ShapeLayout};
use crate::grid::ParticleGrid;
use crate::integrate;
use crate::plan::{Layout, Pass, StepPlan};
use crate::strategy::{SolverStrategy, StepResult};

/// Explicit penalty-force solver with symplectic Euler integration.
///
/// Holds no simulation state of its own: the cached plan, derived joint
/// and shape data, the particle grid and a neutral control are all
/// rebuilt from the model on demand.
pub struct SemiImplicitSolver {
    config: SemiImplicitConfig,
    backend: Box<dyn Backend>,
    plan: Option<StepPlan>,
    joints: Option<JointLayout>,
    shapes: Option<ShapeLayout>,
    grid: ParticleGrid,
    neutral_control: Control,
    plan_compilations: usize,
}

impl SemiImplicitSolver {
    /// Creates a solver using the backend named in `config`.
    pub fn new(config: SemiImplicitConfig) -> KinemaResult<Self> {
        let backend = config.backend.create();
        Self::with_backend(config, backend)
    }

    /// Creates a solver with an explicit backend, overriding `config.backend`.
    pub fn with_backend(config: SemiImplicitConfig, backend: Box<dyn Backend>) -> KinemaResult<Self> {
        config.validate()?;
        tracing::debug!(backend = backend.name(), "Created semi-implicit solver");
        Ok(Self {
            config,
            backend,
            plan: None,
            joints: None,
            shapes: None,
            grid: ParticleGrid::default(),
            neutral_control: Control::default(),
            plan_compilations: 0,
        })
    }

    pub fn config(&self) -> &SemiImplicitConfig {
        &self.config
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// The plan replayed by the last step, if any.
    pub fn plan(&self) -> Option<&StepPlan> {
        self.plan.as_ref()
    }

    /// How many times a plan has been compiled.
    pub fn plan_compilations(&self) -> usize {
        self.plan_compilations
    }

    /// Compile a new plan unless the cached one matches `layout`.
    fn ensure_plan(&mut self, model: &Model, layout: Layout) -> bool {
        if self.plan.as_ref().is_some_and(|p| p.matches(&layout)) {
            return false;
        }
        let plan = StepPlan::compile(layout);
        self.plan_compilations += 1;
        tracing::debug!(
            launches = plan.len(),
            particles = layout.particles,
            bodies = layout.bodies,
            rigid_contacts = layout.rigid_contacts,
            soft_contacts = layout.soft_contacts,
            "Compiled step plan"
        );
        self.plan = Some(plan);
        self.neutral_control = Control::zeros(model);
        true
    }

    /// Build any derived data that is missing or stale.
    fn ensure_derived(&mut self, model: &Model) {
        if self
            .joints
            .as_ref()
            .map_or(true, |j| j.axis_start.len() != model.joint_count())
        {
            self.joints = Some(JointLayout::build(model));
        }
        if self
            .shapes
            .as_ref()
            .map_or(true, |s| s.body.len() != model.shape_count())
        {
            self.shapes = Some(ShapeLayout::build(model));
        }
    }

    fn validate_inputs(
        model: &Model,
        state_in: &State,
        state_out: &State,
        control: Option<&Control>,
        contacts: &Contacts,
        dt: f32,
    ) -> KinemaResult<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(KinemaError::InvalidParameter(format!(
                "time step must be finite and non-negative, got {dt}"
            )));
        }
        state_in.check_layout(model)?;
        state_out.check_layout(model)?;
        if let Some(control) = control {
            control.validate(model)?;
        }
        contacts.validate(model)
    }
}

impl SolverStrategy for SemiImplicitSolver {
    fn step(
        &mut self,
        model: &Model,
        state_in: &mut State,
        state_out: &mut State,
        control: Option<&Control>,
        contacts: Option<&Contacts>,
        dt: f32,
    ) -> KinemaResult<StepResult> {
        let start = Instant::now();

        let no_contacts = Contacts::new();
        let contacts = contacts.unwrap_or(&no_contacts);
        Self::validate_inputs(model, state_in, state_out, control, contacts, dt)?;

        let layout = Layout::new(model, contacts, &self.config.evaluators);
        let plan_rebuilt = self.ensure_plan(model, layout);
        self.ensure_derived(model);

        // ─── Clear ───
        state_in.clear_forces();

        if layout.particle_grid && layout.evaluators.particles {
            let cell = 2.0 * model.particle_max_radius + model.particle_contact.cohesion.max(0.0);
            self.grid.rebuild(&state_in.particle_positions, cell);
        }

        let (Some(plan), Some(joints), Some(shapes)) = (&self.plan, &self.joints, &self.shapes) else {
            return Err(KinemaError::Dispatch("solver derived data missing after rebuild".into()));
        };
        let backend = self.backend.as_ref();

        // ─── Accumulate ───
        {
            let ctx = ForceContext {
                model,
                state: state_in,
                control: control.unwrap_or(&self.neutral_control),
                has_control: control.is_some(),
                contacts,
                config: &self.config,
                joints,
                shapes,
                grid: &self.grid,
            };
            for launch in plan.launches().iter().filter(|l| l.pass.is_force()) {
                tracing::trace!(pass = launch.pass.name(), dim = launch.dim, "launch");
                let kernel: fn(&ForceContext, usize) = match launch.pass {
                    Pass::Springs => forces::spring::eval,
                    Pass::Triangles => forces::triangle::eval,
                    Pass::TriangleContacts => forces::triangle_contact::eval,
                    Pass::Bending => forces::bending::eval,
                    Pass::Tetrahedra => forces::tetrahedral::eval,
                    Pass::Joints => forces::joint::eval,
                    Pass::Particles => forces::particle::eval,
                    Pass::BodyContacts => forces::body_contact::eval,
                    Pass::ParticleBodyContacts => forces::particle_body_contact::eval,
                    Pass::Muscles => forces::muscle::eval,
                    Pass::IntegrateBodies | Pass::IntegrateParticles => continue,
                };
                backend.launch(launch.dim, &|tid| kernel(&ctx, tid));
            }
        }

        // ─── Integrate ───
        for launch in plan.launches().iter().filter(|l| !l.pass.is_force()) {
            tracing::trace!(pass = launch.pass.name(), dim = launch.dim, "launch");
            match launch.pass {
                Pass::IntegrateBodies => {
                    integrate::bodies(backend, model, state_in, state_out, &self.config, dt)?
                }
                Pass::IntegrateParticles => {
                    integrate::particles(backend, model, state_in, state_out, dt)?
                }
                _ => {}
            }
        }

        Ok(StepResult {
            launches: plan.len(),
            plan_rebuilt,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    fn notify_model_update(&mut self, model: &Model, flags: ModelUpdateFlags) {
        tracing::debug!(?flags, "Model update");
        if flags.intersects(
            ModelUpdateFlags::JOINT_PROPERTIES
                | ModelUpdateFlags::JOINT_AXIS_PROPERTIES
                | ModelUpdateFlags::DOF_PROPERTIES,
        ) {
            self.joints = Some(JointLayout::build(model));
        }
        if flags.contains(ModelUpdateFlags::SHAPE_PROPERTIES) {
            self.shapes = Some(ShapeLayout::build(model));
        }
        if flags.intersects(
            ModelUpdateFlags::JOINT_PROPERTIES
                | ModelUpdateFlags::BODY_PROPERTIES
                | ModelUpdateFlags::SHAPE_PROPERTIES,
        ) {
            self.plan = None;
        }
    }

    fn precompute(&mut self, model: &Model) -> KinemaResult<()> {
        model.validate()?;
        self.joints = Some(JointLayout::build(model));
        self.shapes = Some(ShapeLayout::build(model));
        let layout = Layout::new(model, &Contacts::new(), &self.config.evaluators);
        self.ensure_plan(model, layout);
        Ok(())
    }

    fn name(&self) -> &str {
        "semi_implicit"
    }
}
