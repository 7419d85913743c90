//! Procedural element generators for scenarios and testing.
//!
//! Generators add particles and elements to a [`ModelBuilder`] and report
//! the index ranges they created.

use std::ops::Range;

use kinema_math::{Quat, Vec3};
use kinema_types::{KinemaResult, ParticleFlags, ParticleId};

use crate::builder::ModelBuilder;
use crate::elements::{TetMaterial, TriangleMaterial};

/// A rectangular cloth patch.
///
/// The grid lies in the local XY plane, spanning `[0, cols·cell_width]` in X
/// and `[0, -rows·cell_height]` in Y (top to bottom), then is rotated by
/// `rotation` and moved to `origin`.
#[derive(Debug, Clone)]
pub struct ClothGrid {
    pub origin: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    /// Number of quads along X (vertex count = cols + 1).
    pub cols: usize,
    /// Number of quads along Y (vertex count = rows + 1).
    pub rows: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub particle_mass: f32,
    pub particle_radius: f32,
    pub material: TriangleMaterial,
    /// Bending stiffness and damping; `None` skips hinge generation.
    pub bending: Option<(f32, f32)>,
    /// Local vertex indices created without the `ACTIVE` flag.
    pub fixed: Vec<usize>,
}

impl Default for ClothGrid {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            cols: 8,
            rows: 8,
            cell_width: 0.1,
            cell_height: 0.1,
            particle_mass: 0.01,
            particle_radius: 0.0,
            material: TriangleMaterial::default(),
            bending: None,
            fixed: Vec::new(),
        }
    }
}

/// Index ranges created by a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRanges {
    pub particles: Range<usize>,
    pub triangles: Range<usize>,
    pub bending_edges: usize,
    pub tetrahedra: Range<usize>,
}

/// Adds a cloth grid with two triangles per quad.
///
/// # Example
/// ```
/// use kinema_model::generators::{add_cloth_grid, ClothGrid};
/// use kinema_model::ModelBuilder;
/// let mut builder = ModelBuilder::new();
/// let grid = ClothGrid { cols: 2, rows: 2, ..Default::default() };
/// let ranges = add_cloth_grid(&mut builder, &grid).unwrap();
/// assert_eq!(ranges.particles.len(), 9);  // 3×3 vertices
/// assert_eq!(ranges.triangles.len(), 8);  // 2×2 quads × 2 tris each
/// ```
pub fn add_cloth_grid(builder: &mut ModelBuilder, grid: &ClothGrid) -> KinemaResult<GeneratedRanges> {
    let verts_x = grid.cols + 1;
    let verts_y = grid.rows + 1;
    let first_particle = builder.particle_count();
    let first_triangle = builder.triangle_count();

    for j in 0..verts_y {
        for i in 0..verts_x {
            let local = Vec3::new(
                i as f32 * grid.cell_width,
                -(j as f32) * grid.cell_height, // Top to bottom
                0.0,
            );
            let position = grid.origin + grid.rotation * local;
            builder.add_particle(position, grid.velocity, grid.particle_mass, grid.particle_radius)?;
        }
    }

    for j in 0..grid.rows {
        for i in 0..grid.cols {
            let top_left = (first_particle + j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            // Upper-left triangle
            builder.add_triangle(top_left, bot_left, top_right, grid.material)?;
            // Lower-right triangle
            builder.add_triangle(top_right, bot_left, bot_right, grid.material)?;
        }
    }

    let triangles = first_triangle..builder.triangle_count();
    let bending_edges = match grid.bending {
        Some((ke, kd)) => builder.add_bending_edges(triangles.clone(), ke, kd)?,
        None => 0,
    };

    for &local in &grid.fixed {
        let id = ParticleId((first_particle + local) as u32);
        builder.set_particle_flags(id, ParticleFlags::empty())?;
    }

    Ok(GeneratedRanges {
        particles: first_particle..builder.particle_count(),
        triangles,
        bending_edges,
        tetrahedra: 0..0,
    })
}

/// A box of tetrahedra built from a regular lattice of cubes.
#[derive(Debug, Clone)]
pub struct SoftBlock {
    /// Position of the minimum corner.
    pub origin: Vec3,
    pub velocity: Vec3,
    /// Number of cubes along X, Y and Z.
    pub cells: [usize; 3],
    pub cell_size: f32,
    pub particle_mass: f32,
    pub particle_radius: f32,
    pub material: TetMaterial,
}

impl Default for SoftBlock {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            velocity: Vec3::ZERO,
            cells: [2, 2, 2],
            cell_size: 0.1,
            particle_mass: 0.05,
            particle_radius: 0.0,
            material: TetMaterial::default(),
        }
    }
}

/// Adds a tetrahedral block; each cube is split into six tetrahedra
/// around its main diagonal, so neighbouring cubes share faces exactly.
pub fn add_soft_block(builder: &mut ModelBuilder, block: &SoftBlock) -> KinemaResult<GeneratedRanges> {
    let [nx, ny, nz] = block.cells;
    let (vx, vy, vz) = (nx + 1, ny + 1, nz + 1);
    let first_particle = builder.particle_count();

    for k in 0..vz {
        for j in 0..vy {
            for i in 0..vx {
                let position = block.origin
                    + Vec3::new(i as f32, j as f32, k as f32) * block.cell_size;
                builder.add_particle(
                    position,
                    block.velocity,
                    block.particle_mass,
                    block.particle_radius,
                )?;
            }
        }
    }

    let vertex = |i: usize, j: usize, k: usize| (first_particle + (k * vy + j) * vx + i) as u32;
    let axes = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];
    let paths = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

    let mut first_tet = None;
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                for path in paths {
                    // Walk from the cube's min corner to its max corner
                    let mut corner = [i, j, k];
                    let mut tet = [vertex(i, j, k); 4];
                    for (step, &axis) in path.iter().enumerate() {
                        for d in 0..3 {
                            corner[d] += axes[axis][d];
                        }
                        tet[step + 1] = vertex(corner[0], corner[1], corner[2]);
                    }
                    if !is_right_handed(builder, tet) {
                        tet.swap(2, 3);
                    }
                    let id = builder.add_tetrahedron(tet[0], tet[1], tet[2], tet[3], block.material)?;
                    first_tet.get_or_insert(id);
                }
            }
        }
    }

    let tet_start = first_tet.unwrap_or(0);
    let tet_end = first_tet.map_or(0, |_| tet_start + nx * ny * nz * 6);
    Ok(GeneratedRanges {
        particles: first_particle..builder.particle_count(),
        triangles: 0..0,
        bending_edges: 0,
        tetrahedra: tet_start..tet_end,
    })
}

fn is_right_handed(builder: &ModelBuilder, tet: [u32; 4]) -> bool {
    let p = |i: u32| builder.particle_position(i as usize).unwrap_or(Vec3::ZERO);
    let x0 = p(tet[0]);
    let e1 = p(tet[1]) - x0;
    let e2 = p(tet[2]) - x0;
    let e3 = p(tet[3]) - x0;
    e1.cross(e2).dot(e3) > 0.0
}
