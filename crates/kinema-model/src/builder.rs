//! Model construction with fail-fast validation.
//!
//! Every `add_*` method checks its inputs immediately and computes the
//! element's rest-state data from the current particle positions, so a
//! bad index or a degenerate element is reported at the call that
//! introduced it. [`ModelBuilder::finalize`] checks the global
//! coefficients and the cross references once more before handing out
//! the [`Model`].

use std::ops::Range;

use kinema_math::geometry::dihedral_gradient;
use kinema_math::{Mat2, Mat3, Transform, Vec2, Vec3};
use kinema_types::constants::{
    DEFAULT_PARTICLE_MAX_VELOCITY, DEGENERATE_AREA_THRESHOLD, DEGENERATE_LENGTH, GRAVITY,
};
use kinema_types::{
    BodyId, JointId, KinemaError, KinemaResult, ParticleFlags, ParticleId, ShapeId,
};

use crate::elements::{
    BendingEdge, Body, ContactMaterial, Joint, JointAxis, JointKind, Muscle, MuscleWaypoint,
    ParticleContactParams, Shape, ShapeGeometry, SoftContactParams, Spring, TetMaterial,
    Tetrahedron, Triangle, TriangleContactParams, TriangleMaterial,
};
use crate::model::Model;
use crate::topology::Topology;

/// Mass properties and initial conditions of a new rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub transform: Transform,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Centre of mass in body coordinates.
    pub com: Vec3,
    /// Zero mass makes the body kinematic.
    pub mass: f32,
    /// Inertia about the centre of mass, body frame.
    pub inertia: Mat3,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            com: Vec3::ZERO,
            mass: 0.0,
            inertia: Mat3::ZERO,
        }
    }
}

impl BodyDesc {
    /// Solid sphere of uniform density.
    pub fn sphere(mass: f32, radius: f32) -> Self {
        let i = 0.4 * mass * radius * radius;
        Self {
            mass,
            inertia: Mat3::from_diagonal(Vec3::splat(i)),
            ..Default::default()
        }
    }

    /// Solid box of uniform density.
    pub fn cuboid(mass: f32, half_extents: Vec3) -> Self {
        let h2 = half_extents * half_extents;
        let k = mass / 3.0;
        Self {
            mass,
            inertia: Mat3::from_diagonal(Vec3::new(
                k * (h2.y + h2.z),
                k * (h2.x + h2.z),
                k * (h2.x + h2.y),
            )),
            ..Default::default()
        }
    }

    pub fn at(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_velocity(mut self, linear: Vec3, angular: Vec3) -> Self {
        self.linear_velocity = linear;
        self.angular_velocity = angular;
        self
    }
}

/// Description of a new joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointDesc {
    pub kind: JointKind,
    pub parent: Option<BodyId>,
    pub child: BodyId,
    pub parent_frame: Transform,
    pub child_frame: Transform,
    pub axis: JointAxis,
}

impl JointDesc {
    pub fn new(kind: JointKind, parent: Option<BodyId>, child: BodyId) -> Self {
        Self {
            kind,
            parent,
            child,
            parent_frame: Transform::IDENTITY,
            child_frame: Transform::IDENTITY,
            axis: JointAxis::default(),
        }
    }

    pub fn with_frames(mut self, parent_frame: Transform, child_frame: Transform) -> Self {
        self.parent_frame = parent_frame;
        self.child_frame = child_frame;
        self
    }

    pub fn with_axis(mut self, axis: JointAxis) -> Self {
        self.axis = axis;
        self
    }
}

/// Incremental model builder.
///
/// Global coefficients are public fields; elements are added through
/// the `add_*` methods.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    pub gravity: Vec3,
    pub particle_contact: ParticleContactParams,
    pub particle_max_velocity: f32,
    pub soft_contact: SoftContactParams,
    pub rigid_contact_margin: f32,
    pub triangle_contact: TriangleContactParams,

    particle_positions: Vec<Vec3>,
    particle_velocities: Vec<Vec3>,
    particle_mass: Vec<f32>,
    particle_radius: Vec<f32>,
    particle_flags: Vec<ParticleFlags>,

    springs: Vec<Spring>,
    triangles: Vec<Triangle>,
    bending_edges: Vec<BendingEdge>,
    tetrahedra: Vec<Tetrahedron>,
    bodies: Vec<Body>,
    joints: Vec<Joint>,
    shapes: Vec<Shape>,
    muscles: Vec<Muscle>,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    /// Creates an empty builder with Y-up gravity.
    pub fn new() -> Self {
        Self {
            gravity: Vec3::new(0.0, -GRAVITY, 0.0),
            particle_contact: ParticleContactParams::default(),
            particle_max_velocity: DEFAULT_PARTICLE_MAX_VELOCITY,
            soft_contact: SoftContactParams::default(),
            rigid_contact_margin: 0.1,
            triangle_contact: TriangleContactParams::default(),
            particle_positions: Vec::new(),
            particle_velocities: Vec::new(),
            particle_mass: Vec::new(),
            particle_radius: Vec::new(),
            particle_flags: Vec::new(),
            springs: Vec::new(),
            triangles: Vec::new(),
            bending_edges: Vec::new(),
            tetrahedra: Vec::new(),
            bodies: Vec::new(),
            joints: Vec::new(),
            shapes: Vec::new(),
            muscles: Vec::new(),
        }
    }

    pub fn particle_count(&self) -> usize {
        self.particle_positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Initial position of particle `i`.
    pub fn particle_position(&self, i: usize) -> Option<Vec3> {
        self.particle_positions.get(i).copied()
    }

    // ─── Particles ───────────────────────────────────────────

    /// Adds a particle. Zero mass makes it immovable by forces.
    pub fn add_particle(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        mass: f32,
        radius: f32,
    ) -> KinemaResult<ParticleId> {
        let id = self.particle_positions.len();
        if !position.is_finite() || !velocity.is_finite() {
            return Err(KinemaError::InvalidParameter(format!(
                "particle {id} has non-finite initial position or velocity"
            )));
        }
        non_negative(&format!("particle {id} mass"), mass)?;
        non_negative(&format!("particle {id} radius"), radius)?;

        self.particle_positions.push(position);
        self.particle_velocities.push(velocity);
        self.particle_mass.push(mass);
        self.particle_radius.push(radius);
        self.particle_flags.push(ParticleFlags::ACTIVE);
        Ok(ParticleId(id as u32))
    }

    pub fn set_particle_flags(&mut self, id: ParticleId, flags: ParticleFlags) -> KinemaResult<()> {
        let n = self.particle_flags.len();
        let slot = self.particle_flags.get_mut(id.index()).ok_or_else(|| {
            KinemaError::InvalidTopology(format!("particle {} out of range ({n} particles)", id.0))
        })?;
        *slot = flags;
        Ok(())
    }

    // ─── Springs ─────────────────────────────────────────────

    /// Adds a spring whose rest length is the current separation.
    pub fn add_spring(&mut self, i: u32, j: u32, ke: f32, kd: f32) -> KinemaResult<usize> {
        let id = self.springs.len();
        self.check_indices(&[i, j], "spring", id)?;
        let rest = (self.particle_positions[i as usize] - self.particle_positions[j as usize]).length();
        self.add_spring_with_rest(i, j, rest, ke, kd)
    }

    pub fn add_spring_with_rest(
        &mut self,
        i: u32,
        j: u32,
        rest_length: f32,
        ke: f32,
        kd: f32,
    ) -> KinemaResult<usize> {
        let id = self.springs.len();
        self.check_indices(&[i, j], "spring", id)?;
        if !rest_length.is_finite() || rest_length < DEGENERATE_LENGTH {
            return Err(KinemaError::InvalidTopology(format!(
                "spring {id} has degenerate rest length {rest_length}"
            )));
        }
        non_negative(&format!("spring {id} ke"), ke)?;
        non_negative(&format!("spring {id} kd"), kd)?;
        self.springs.push(Spring {
            indices: [i, j],
            rest_length,
            ke,
            kd,
        });
        Ok(id)
    }

    // ─── Triangles ───────────────────────────────────────────

    /// Adds a membrane triangle with its rest metric taken from the
    /// current particle positions.
    pub fn add_triangle(
        &mut self,
        i: u32,
        j: u32,
        k: u32,
        material: TriangleMaterial,
    ) -> KinemaResult<usize> {
        let id = self.triangles.len();
        self.check_indices(&[i, j, k], "triangle", id)?;
        check_triangle_material(id, &material)?;

        let p = &self.particle_positions;
        let e1 = p[j as usize] - p[i as usize];
        let e2 = p[k as usize] - p[i as usize];
        let rest_area = 0.5 * e1.cross(e2).length();
        if rest_area < DEGENERATE_AREA_THRESHOLD {
            return Err(KinemaError::InvalidTopology(format!(
                "triangle {id} is degenerate (area {rest_area:e})"
            )));
        }
        let dm_inv = rest_metric_inverse(e1, e2).ok_or_else(|| {
            KinemaError::InvalidTopology(format!("triangle {id} has a singular rest metric"))
        })?;

        self.triangles.push(Triangle {
            indices: [i, j, k],
            dm_inv,
            rest_area,
            material,
        });
        Ok(id)
    }

    // ─── Bending ─────────────────────────────────────────────

    /// Adds one bending hinge; the rest angle is the current dihedral angle.
    pub fn add_bending_edge(
        &mut self,
        wing_a: u32,
        wing_b: u32,
        v0: u32,
        v1: u32,
        ke: f32,
        kd: f32,
    ) -> KinemaResult<usize> {
        let id = self.bending_edges.len();
        self.check_indices(&[wing_a, wing_b, v0, v1], "bending edge", id)?;
        non_negative(&format!("bending edge {id} ke"), ke)?;
        non_negative(&format!("bending edge {id} kd"), kd)?;

        let p = &self.particle_positions;
        let rest_angle = dihedral_gradient(
            p[wing_a as usize],
            p[wing_b as usize],
            p[v0 as usize],
            p[v1 as usize],
        )
        .map(|d| d.angle)
        .unwrap_or(0.0);

        self.bending_edges.push(BendingEdge {
            indices: [wing_a, wing_b, v0, v1],
            rest_angle,
            ke,
            kd,
        });
        Ok(id)
    }

    /// Adds a bending hinge on every interior edge of the given triangles.
    ///
    /// Returns the number of hinges created.
    pub fn add_bending_edges(
        &mut self,
        triangles: Range<usize>,
        ke: f32,
        kd: f32,
    ) -> KinemaResult<usize> {
        if triangles.end > self.triangles.len() || triangles.start > triangles.end {
            return Err(KinemaError::InvalidTopology(format!(
                "triangle range {triangles:?} out of bounds ({} triangles)",
                self.triangles.len()
            )));
        }
        let indices: Vec<[u32; 3]> = self.triangles[triangles]
            .iter()
            .map(|t| t.indices)
            .collect();
        let topology = Topology::build(self.particle_positions.len(), &indices);
        if topology.non_manifold_edge_count() > 0 {
            tracing::warn!(
                edges = topology.non_manifold_edge_count(),
                "Skipping bending on non-manifold edges"
            );
        }

        for edge in &topology.interior_edges {
            self.add_bending_edge(edge.wing_a, edge.wing_b, edge.v0, edge.v1, ke, kd)?;
        }
        Ok(topology.interior_edges.len())
    }

    // ─── Tetrahedra ──────────────────────────────────────────

    /// Adds a tetrahedron. The rest volume must be positive, so vertex
    /// order must be right-handed.
    pub fn add_tetrahedron(
        &mut self,
        i: u32,
        j: u32,
        k: u32,
        l: u32,
        material: TetMaterial,
    ) -> KinemaResult<usize> {
        let id = self.tetrahedra.len();
        self.check_indices(&[i, j, k, l], "tetrahedron", id)?;
        non_negative(&format!("tetrahedron {id} k_mu"), material.k_mu)?;
        non_negative(&format!("tetrahedron {id} k_lambda"), material.k_lambda)?;
        non_negative(&format!("tetrahedron {id} k_damp"), material.k_damp)?;

        let p = &self.particle_positions;
        let x0 = p[i as usize];
        let dm = Mat3::from_cols(p[j as usize] - x0, p[k as usize] - x0, p[l as usize] - x0);
        let rest_volume = dm.determinant() / 6.0;
        if rest_volume < DEGENERATE_AREA_THRESHOLD {
            return Err(KinemaError::InvalidTopology(format!(
                "tetrahedron {id} has non-positive rest volume {rest_volume:e}"
            )));
        }

        self.tetrahedra.push(Tetrahedron {
            indices: [i, j, k, l],
            dm_inv: dm.inverse(),
            rest_volume,
            material,
        });
        Ok(id)
    }

    // ─── Bodies ──────────────────────────────────────────────

    pub fn add_body(&mut self, desc: BodyDesc) -> KinemaResult<BodyId> {
        let id = self.bodies.len();
        if !desc.transform.p.is_finite()
            || !desc.com.is_finite()
            || !desc.linear_velocity.is_finite()
            || !desc.angular_velocity.is_finite()
        {
            return Err(KinemaError::InvalidParameter(format!(
                "body {id} has non-finite initial conditions"
            )));
        }
        let q_len = desc.transform.q.length();
        if !q_len.is_finite() || q_len < DEGENERATE_LENGTH {
            return Err(KinemaError::InvalidParameter(format!(
                "body {id} has an invalid orientation quaternion"
            )));
        }
        non_negative(&format!("body {id} mass"), desc.mass)?;

        let (inv_mass, inv_inertia) = if desc.mass > 0.0 {
            let det = desc.inertia.determinant();
            if !det.is_finite() || det <= 0.0 {
                return Err(KinemaError::InvalidParameter(format!(
                    "body {id} has mass {} but a singular inertia tensor",
                    desc.mass
                )));
            }
            (1.0 / desc.mass, desc.inertia.inverse())
        } else {
            (0.0, Mat3::ZERO)
        };

        self.bodies.push(Body {
            transform: Transform::new(desc.transform.p, desc.transform.q / q_len),
            angular_velocity: desc.angular_velocity,
            linear_velocity: desc.linear_velocity,
            com: desc.com,
            mass: desc.mass,
            inv_mass,
            inertia: desc.inertia,
            inv_inertia,
        });
        Ok(BodyId(id as u32))
    }

    // ─── Joints ──────────────────────────────────────────────

    pub fn add_joint(&mut self, desc: JointDesc) -> KinemaResult<JointId> {
        let id = self.joints.len();
        self.check_body(desc.child, "joint", id)?;
        if let Some(parent) = desc.parent {
            self.check_body(parent, "joint", id)?;
            if parent == desc.child {
                return Err(KinemaError::InvalidTopology(format!(
                    "joint {id} connects body {} to itself",
                    parent.0
                )));
            }
        }

        let mut axis = desc.axis;
        if desc.kind.axis_count() > 0 {
            let len = axis.axis.length();
            if !len.is_finite() || len < DEGENERATE_LENGTH {
                return Err(KinemaError::InvalidParameter(format!(
                    "joint {id} ({:?}) needs a non-zero axis",
                    desc.kind
                )));
            }
            axis.axis /= len;
        }
        for (name, v) in [
            ("target_ke", axis.target_ke),
            ("target_kd", axis.target_kd),
            ("limit_ke", axis.limit_ke),
            ("limit_kd", axis.limit_kd),
        ] {
            non_negative(&format!("joint {id} {name}"), v)?;
        }
        if axis.limit_lower.is_nan() || axis.limit_upper.is_nan() || axis.limit_lower > axis.limit_upper {
            return Err(KinemaError::InvalidParameter(format!(
                "joint {id} has invalid limits [{}, {}]",
                axis.limit_lower, axis.limit_upper
            )));
        }

        self.joints.push(Joint {
            kind: desc.kind,
            parent: desc.parent,
            child: desc.child,
            parent_frame: desc.parent_frame,
            child_frame: desc.child_frame,
            axis,
        });
        Ok(JointId(id as u32))
    }

    // ─── Shapes ──────────────────────────────────────────────

    pub fn add_shape(
        &mut self,
        body: Option<BodyId>,
        transform: Transform,
        geometry: ShapeGeometry,
        material: ContactMaterial,
    ) -> KinemaResult<ShapeId> {
        let id = self.shapes.len();
        if let Some(body) = body {
            self.check_body(body, "shape", id)?;
        }
        let dims_ok = match geometry {
            ShapeGeometry::Sphere { radius } => radius.is_finite() && radius > 0.0,
            ShapeGeometry::Box { half_extents } => {
                half_extents.is_finite() && half_extents.min_element() > 0.0
            }
            ShapeGeometry::Capsule { radius, half_height } => {
                radius.is_finite() && radius > 0.0 && half_height.is_finite() && half_height >= 0.0
            }
            ShapeGeometry::Plane => true,
        };
        if !dims_ok {
            return Err(KinemaError::InvalidParameter(format!(
                "shape {id} has invalid dimensions: {geometry:?}"
            )));
        }
        check_contact_material(&format!("shape {id}"), &material)?;

        self.shapes.push(Shape {
            body,
            transform,
            geometry,
            material,
        });
        Ok(ShapeId(id as u32))
    }

    /// Adds a static ground plane through the origin with +Y normal.
    pub fn add_ground_plane(&mut self, material: ContactMaterial) -> KinemaResult<ShapeId> {
        self.add_shape(None, Transform::IDENTITY, ShapeGeometry::Plane, material)
    }

    // ─── Muscles ─────────────────────────────────────────────

    pub fn add_muscle(
        &mut self,
        waypoints: Vec<MuscleWaypoint>,
        max_force: f32,
    ) -> KinemaResult<usize> {
        let id = self.muscles.len();
        if waypoints.len() < 2 {
            return Err(KinemaError::InvalidTopology(format!(
                "muscle {id} needs at least two waypoints, got {}",
                waypoints.len()
            )));
        }
        for w in &waypoints {
            self.check_body(w.body, "muscle", id)?;
        }
        non_negative(&format!("muscle {id} max_force"), max_force)?;
        self.muscles.push(Muscle {
            waypoints,
            max_force,
        });
        Ok(id)
    }

    // ─── Finalize ────────────────────────────────────────────

    /// Validates global coefficients and produces the model.
    pub fn finalize(self) -> KinemaResult<Model> {
        if !self.gravity.is_finite() {
            return Err(KinemaError::InvalidParameter("gravity must be finite".into()));
        }
        if !self.particle_max_velocity.is_finite() || self.particle_max_velocity <= 0.0 {
            return Err(KinemaError::InvalidParameter(format!(
                "particle_max_velocity must be positive, got {}",
                self.particle_max_velocity
            )));
        }
        let pc = &self.particle_contact;
        for (name, v) in [
            ("particle ke", pc.ke),
            ("particle kd", pc.kd),
            ("particle kf", pc.kf),
            ("particle mu", pc.mu),
            ("particle cohesion", pc.cohesion),
            ("particle adhesion", pc.adhesion),
            ("soft contact ke", self.soft_contact.ke),
            ("soft contact kd", self.soft_contact.kd),
            ("soft contact kf", self.soft_contact.kf),
            ("soft contact mu", self.soft_contact.mu),
            ("soft contact margin", self.soft_contact.margin),
            ("rigid contact margin", self.rigid_contact_margin),
            ("triangle contact distance", self.triangle_contact.distance),
            ("triangle contact ke", self.triangle_contact.ke),
        ] {
            non_negative(name, v)?;
        }

        let particle_inv_mass = self
            .particle_mass
            .iter()
            .map(|&m| if m > 0.0 { 1.0 / m } else { 0.0 })
            .collect();
        let particle_max_radius = self.particle_radius.iter().copied().fold(0.0f32, f32::max);

        let model = Model {
            particle_positions: self.particle_positions,
            particle_velocities: self.particle_velocities,
            particle_mass: self.particle_mass,
            particle_inv_mass,
            particle_radius: self.particle_radius,
            particle_flags: self.particle_flags,
            particle_max_radius,
            particle_max_velocity: self.particle_max_velocity,
            particle_contact: self.particle_contact,
            springs: self.springs,
            triangles: self.triangles,
            bending_edges: self.bending_edges,
            tetrahedra: self.tetrahedra,
            bodies: self.bodies,
            joints: self.joints,
            shapes: self.shapes,
            muscles: self.muscles,
            soft_contact: self.soft_contact,
            rigid_contact_margin: self.rigid_contact_margin,
            triangle_contact: self.triangle_contact,
            gravity: self.gravity,
        };
        model.validate()?;

        tracing::debug!(
            particles = model.particle_count(),
            springs = model.spring_count(),
            triangles = model.triangle_count(),
            bending_edges = model.bending_edge_count(),
            tetrahedra = model.tetrahedron_count(),
            bodies = model.body_count(),
            joints = model.joint_count(),
            shapes = model.shape_count(),
            muscles = model.muscle_count(),
            "Model finalized"
        );
        Ok(model)
    }

    // ─── Checks ──────────────────────────────────────────────

    fn check_particle(&self, idx: u32, kind: &str, element: usize) -> KinemaResult<()> {
        let n = self.particle_positions.len();
        if idx as usize >= n {
            return Err(KinemaError::InvalidTopology(format!(
                "{kind} {element} references particle {idx}, but particle count is {n}"
            )));
        }
        Ok(())
    }

    fn check_indices(&self, indices: &[u32], kind: &str, element: usize) -> KinemaResult<()> {
        for &idx in indices {
            self.check_particle(idx, kind, element)?;
        }
        for (a, &ia) in indices.iter().enumerate() {
            if indices[a + 1..].contains(&ia) {
                return Err(KinemaError::InvalidTopology(format!(
                    "{kind} {element} repeats particle {ia}: {indices:?}"
                )));
            }
        }
        Ok(())
    }

    fn check_body(&self, body: BodyId, kind: &str, element: usize) -> KinemaResult<()> {
        let n = self.bodies.len();
        if body.index() >= n {
            return Err(KinemaError::InvalidTopology(format!(
                "{kind} {element} references body {}, but body count is {n}",
                body.0
            )));
        }
        Ok(())
    }
}

/// Inverse of the rest edge matrix expressed in the triangle's own 2D frame.
///
/// The frame has `u` along the first edge and `v` in the triangle plane
/// orthogonal to it.
fn rest_metric_inverse(e1: Vec3, e2: Vec3) -> Option<Mat2> {
    let len_e1 = e1.length();
    if len_e1 < DEGENERATE_LENGTH {
        return None;
    }
    let u = e1 / len_e1;
    let n = e1.cross(e2);
    if n.length() < DEGENERATE_AREA_THRESHOLD {
        return None;
    }
    let v = n.cross(u).normalize();

    let dm = Mat2::from_cols(Vec2::new(e1.dot(u), e1.dot(v)), Vec2::new(e2.dot(u), e2.dot(v)));
    let det = dm.determinant();
    if det.abs() < DEGENERATE_AREA_THRESHOLD {
        return None;
    }
    Some(dm.inverse())
}

fn non_negative(name: &str, value: f32) -> KinemaResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(KinemaError::InvalidParameter(format!(
            "{name} must be finite and non-negative, got {value}"
        )));
    }
    Ok(())
}

fn check_triangle_material(id: usize, m: &TriangleMaterial) -> KinemaResult<()> {
    non_negative(&format!("triangle {id} ke"), m.ke)?;
    non_negative(&format!("triangle {id} ka"), m.ka)?;
    non_negative(&format!("triangle {id} kd"), m.kd)?;
    non_negative(&format!("triangle {id} drag"), m.drag)?;
    non_negative(&format!("triangle {id} lift"), m.lift)?;
    if let Some(a) = m.anisotropy {
        non_negative(&format!("triangle {id} warp"), a.warp)?;
        non_negative(&format!("triangle {id} weft"), a.weft)?;
        non_negative(&format!("triangle {id} shear"), a.shear)?;
    }
    Ok(())
}

fn check_contact_material(owner: &str, m: &ContactMaterial) -> KinemaResult<()> {
    non_negative(&format!("{owner} ke"), m.ke)?;
    non_negative(&format!("{owner} kd"), m.kd)?;
    non_negative(&format!("{owner} kf"), m.kf)?;
    non_negative(&format!("{owner} ka"), m.ka)?;
    non_negative(&format!("{owner} mu"), m.mu)?;
    Ok(())
}
