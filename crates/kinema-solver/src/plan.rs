//! Execution plan: record once, replay many.
//!
//! A [`StepPlan`] is the ordered list of kernel launches for one step. It
//! is compiled from a [`Layout`] (element counts plus the enabled
//! evaluators) and replayed verbatim for as long as the layout stays the
//! same. Evaluators with an empty domain or a disabled switch never make
//! it into the plan.

use kinema_contact::Contacts;
use kinema_model::Model;

use crate::config::EvaluatorSet;

/// One kernel kind in the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    Springs,
    Triangles,
    TriangleContacts,
    Bending,
    Tetrahedra,
    Joints,
    Particles,
    BodyContacts,
    ParticleBodyContacts,
    Muscles,
    IntegrateBodies,
    IntegrateParticles,
}

impl Pass {
    /// Every pass in execution order.
    pub const ALL: [Pass; 12] = [
        Pass::Springs,
        Pass::Triangles,
        Pass::TriangleContacts,
        Pass::Bending,
        Pass::Tetrahedra,
        Pass::Joints,
        Pass::Particles,
        Pass::BodyContacts,
        Pass::ParticleBodyContacts,
        Pass::Muscles,
        Pass::IntegrateBodies,
        Pass::IntegrateParticles,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Pass::Springs => "springs",
            Pass::Triangles => "triangles",
            Pass::TriangleContacts => "triangle_contacts",
            Pass::Bending => "bending",
            Pass::Tetrahedra => "tetrahedra",
            Pass::Joints => "joints",
            Pass::Particles => "particles",
            Pass::BodyContacts => "body_contacts",
            Pass::ParticleBodyContacts => "particle_body_contacts",
            Pass::Muscles => "muscles",
            Pass::IntegrateBodies => "integrate_bodies",
            Pass::IntegrateParticles => "integrate_particles",
        }
    }

    /// True for the accumulate phase, false for integration.
    pub fn is_force(self) -> bool {
        !matches!(self, Pass::IntegrateBodies | Pass::IntegrateParticles)
    }
}

/// A single recorded launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Launch {
    pub pass: Pass,
    /// Size of the index domain.
    pub dim: usize,
}

/// Everything that decides which launches a step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    pub particles: usize,
    pub springs: usize,
    pub triangles: usize,
    pub bending_edges: usize,
    pub tetrahedra: usize,
    pub bodies: usize,
    pub joints: usize,
    pub muscles: usize,
    pub rigid_contacts: usize,
    pub soft_contacts: usize,
    /// Particle–particle interaction is possible (positive radius, two or
    /// more particles).
    pub particle_grid: bool,
    pub evaluators: EvaluatorSet,
}

impl Layout {
    pub fn new(model: &Model, contacts: &Contacts, evaluators: &EvaluatorSet) -> Self {
        Self {
            particles: model.particle_count(),
            springs: model.spring_count(),
            triangles: model.triangle_count(),
            bending_edges: model.bending_edge_count(),
            tetrahedra: model.tetrahedron_count(),
            bodies: model.body_count(),
            joints: model.joint_count(),
            muscles: model.muscle_count(),
            rigid_contacts: contacts.rigid_count(),
            soft_contacts: contacts.soft_count(),
            particle_grid: model.particle_max_radius > 0.0 && model.particle_count() > 1,
            evaluators: *evaluators,
        }
    }

    /// Domain size and enable switch for `pass`.
    fn domain(&self, pass: Pass) -> (usize, bool) {
        let e = &self.evaluators;
        match pass {
            Pass::Springs => (self.springs, e.springs),
            Pass::Triangles => (self.triangles, e.triangles),
            Pass::TriangleContacts => (self.particles * self.triangles, e.triangle_contacts),
            Pass::Bending => (self.bending_edges, e.bending),
            Pass::Tetrahedra => (self.tetrahedra, e.tetrahedra),
            Pass::Joints => (self.joints, e.joints),
            Pass::Particles => (
                if self.particle_grid { self.particles } else { 0 },
                e.particles,
            ),
            Pass::BodyContacts => (self.rigid_contacts, e.body_contacts),
            Pass::ParticleBodyContacts => (self.soft_contacts, e.particle_body_contacts),
            Pass::Muscles => (self.muscles, e.muscles),
            Pass::IntegrateBodies => (self.bodies, true),
            Pass::IntegrateParticles => (self.particles, true),
        }
    }
}

/// Compiled launch list bound to one [`Layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepPlan {
    layout: Layout,
    launches: Vec<Launch>,
}

impl StepPlan {
    /// Record the launches for `layout`, skipping empty or disabled passes.
    pub fn compile(layout: Layout) -> Self {
        let launches = Pass::ALL
            .iter()
            .filter_map(|&pass| {
                let (dim, enabled) = layout.domain(pass);
                (enabled && dim > 0).then_some(Launch { pass, dim })
            })
            .collect();
        Self { layout, launches }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn launches(&self) -> &[Launch] {
        &self.launches
    }

    pub fn len(&self) -> usize {
        self.launches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.launches.is_empty()
    }

    /// Whether this plan can be replayed for `layout`.
    pub fn matches(&self, layout: &Layout) -> bool {
        self.layout == *layout
    }

    pub fn contains(&self, pass: Pass) -> bool {
        self.launches.iter().any(|l| l.pass == pass)
    }
}
