//! Triangle adjacency queries.
//!
//! Builds edge adjacency from a triangle index list. Used by the model
//! builder to generate bending hinges across interior edges.

use std::collections::BTreeMap;

/// Precomputed adjacency for a set of triangles.
///
/// Edges are stored in ascending `(v_min, v_max)` order so the derived
/// element order is reproducible across runs.
#[derive(Debug, Clone)]
pub struct Topology {
    /// For each vertex, the triangles that contain it.
    pub vertex_triangles: Vec<Vec<u32>>,

    /// Unique edges as `(v_min, v_max)` pairs.
    pub edges: Vec<[u32; 2]>,

    /// For each edge, the adjacent triangles.
    /// Boundary edges have exactly 1 adjacent triangle.
    pub edge_triangles: Vec<Vec<u32>>,

    /// Edges shared by exactly two triangles.
    pub interior_edges: Vec<InteriorEdge>,
}

/// An interior (non-boundary) edge with its two adjacent triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteriorEdge {
    /// Vertex A of the shared edge.
    pub v0: u32,
    /// Vertex B of the shared edge.
    pub v1: u32,
    /// The vertex of triangle A not on the edge.
    pub wing_a: u32,
    /// The vertex of triangle B not on the edge.
    pub wing_b: u32,
    pub tri_a: u32,
    pub tri_b: u32,
}

impl Topology {
    /// Build topology from triangle indices over `vertex_count` vertices.
    ///
    /// Triangle indices are reported relative to the start of `triangles`.
    pub fn build(vertex_count: usize, triangles: &[[u32; 3]]) -> Self {
        let mut vertex_triangles: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
        for (t, tri) in triangles.iter().enumerate() {
            for &v in tri {
                vertex_triangles[v as usize].push(t as u32);
            }
        }

        // Key: (min_vertex, max_vertex) to canonicalize edge direction
        let mut edge_map: BTreeMap<(u32, u32), Vec<u32>> = BTreeMap::new();
        for (t, &[a, b, c]) in triangles.iter().enumerate() {
            for (v0, v1) in [(a, b), (b, c), (c, a)] {
                let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
                edge_map.entry(key).or_default().push(t as u32);
            }
        }

        let mut edges = Vec::with_capacity(edge_map.len());
        let mut edge_triangles = Vec::with_capacity(edge_map.len());
        let mut interior_edges = Vec::new();

        for ((v0, v1), tris) in edge_map {
            if let [tri_a, tri_b] = tris[..] {
                interior_edges.push(InteriorEdge {
                    v0,
                    v1,
                    wing_a: wing_vertex(triangles[tri_a as usize], v0, v1),
                    wing_b: wing_vertex(triangles[tri_b as usize], v0, v1),
                    tri_a,
                    tri_b,
                });
            }
            edges.push([v0, v1]);
            edge_triangles.push(tris);
        }

        Self {
            vertex_triangles,
            edges,
            edge_triangles,
            interior_edges,
        }
    }

    /// Returns the number of boundary edges (edges with only 1 adjacent triangle).
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_triangles
            .iter()
            .filter(|tris| tris.len() == 1)
            .count()
    }

    /// Returns true if the surface is closed (no boundary edges).
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count() == 0
    }

    /// Edges shared by more than two triangles.
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_triangles
            .iter()
            .filter(|tris| tris.len() > 2)
            .count()
    }
}

/// The vertex of `tri` that is neither `v0` nor `v1`.
fn wing_vertex(tri: [u32; 3], v0: u32, v1: u32) -> u32 {
    let [a, b, c] = tri;
    if a != v0 && a != v1 {
        a
    } else if b != v0 && b != v1 {
        b
    } else {
        c
    }
}
