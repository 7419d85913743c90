//! Dihedral bending forces (Bridson et al. 2003).

use kinema_math::geometry::dihedral_gradient;

use super::ForceContext;

/// Bending hinge: drives the dihedral angle toward its rest value.
///
/// Indices are `[wing_a, wing_b, edge_v0, edge_v1]`. The bending
/// directions sum to zero, so the hinge exerts no net force. Collapsed
/// hinges are skipped.
pub fn eval(ctx: &ForceContext, tid: usize) {
    let edge = &ctx.model.bending_edges[tid];
    let idx = edge.indices.map(|i| i as usize);

    let x = &ctx.state.particle_positions;
    let v = &ctx.state.particle_velocities;

    let Some(hinge) = dihedral_gradient(x[idx[0]], x[idx[1]], x[idx[2]], x[idx[3]]) else {
        return;
    };

    let f_elastic = edge.ke * (hinge.angle - edge.rest_angle);
    let f_damp = edge.kd
        * idx
            .iter()
            .zip(&hinge.grad)
            .map(|(&p, g)| g.dot(v[p]))
            .sum::<f32>();
    let f_total = -hinge.edge_length * (f_elastic + f_damp);

    let f = &ctx.state.particle_forces;
    for (&p, g) in idx.iter().zip(&hinge.grad) {
        f.add(p, *g * f_total);
    }
}
