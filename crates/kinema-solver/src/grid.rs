//! Uniform hash grid for particle neighbour queries.
//!
//! Partitions space into cubic cells and bins particles by position. A
//! query visits every cell overlapping the search sphere's bounding box,
//! so results are complete for any query radius, not only one cell.

use std::collections::HashMap;

use kinema_math::Vec3;

/// Hash grid rebuilt from particle positions once per step.
///
/// Cell size should be about the largest interaction distance.
#[derive(Debug, Clone)]
pub struct ParticleGrid {
    /// Inverse cell size (cached for performance).
    inv_cell_size: f32,
    cells: HashMap<(i32, i32, i32), Vec<u32>>,
    particle_count: usize,
}

impl ParticleGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            inv_cell_size: 1.0 / cell_size.max(1e-6),
            cells: HashMap::new(),
            particle_count: 0,
        }
    }

    pub fn cell_size(&self) -> f32 {
        1.0 / self.inv_cell_size
    }

    /// Number of particles binned by the last rebuild.
    pub fn len(&self) -> usize {
        self.particle_count
    }

    pub fn is_empty(&self) -> bool {
        self.particle_count == 0
    }

    fn cell_key(&self, x: Vec3) -> (i32, i32, i32) {
        let c = (x * self.inv_cell_size).floor();
        (c.x as i32, c.y as i32, c.z as i32)
    }

    /// Re-bin `positions` with a new cell size.
    ///
    /// Cell storage is reused across rebuilds; cells left empty by the
    /// previous rebuild are dropped.
    pub fn rebuild(&mut self, positions: &[Vec3], cell_size: f32) {
        self.inv_cell_size = 1.0 / cell_size.max(1e-6);
        self.cells.retain(|_, bucket| !bucket.is_empty());
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
        for (i, &x) in positions.iter().enumerate() {
            let key = self.cell_key(x);
            self.cells.entry(key).or_default().push(i as u32);
        }
        self.particle_count = positions.len();
    }

    /// Call `f` for every binned particle in a cell overlapping the cube
    /// of half-width `radius` around `x`.
    ///
    /// Candidates are not distance-filtered. Cells are visited in a fixed
    /// order, so the sequence of calls is deterministic.
    pub fn for_each_candidate(&self, x: Vec3, radius: f32, mut f: impl FnMut(usize)) {
        let lo = self.cell_key(x - Vec3::splat(radius));
        let hi = self.cell_key(x + Vec3::splat(radius));
        for cx in lo.0..=hi.0 {
            for cy in lo.1..=hi.1 {
                for cz in lo.2..=hi.2 {
                    if let Some(bucket) = self.cells.get(&(cx, cy, cz)) {
                        for &j in bucket {
                            f(j as usize);
                        }
                    }
                }
            }
        }
    }
}

impl Default for ParticleGrid {
    fn default() -> Self {
        Self::new(1.0)
    }
}
