//! Damped linear springs between particle pairs.

use kinema_types::constants::DEGENERATE_LENGTH;

use super::ForceContext;

/// Hooke spring with dashpot damping along the spring direction.
///
/// Springs shorter than the degeneracy threshold have no direction and
/// contribute nothing.
pub fn eval(ctx: &ForceContext, tid: usize) {
    let spring = &ctx.model.springs[tid];
    let i = spring.indices[0] as usize;
    let j = spring.indices[1] as usize;

    let x = &ctx.state.particle_positions;
    let v = &ctx.state.particle_velocities;

    let xij = x[i] - x[j];
    let l = xij.length();
    if l < DEGENERATE_LENGTH {
        return;
    }
    let dir = xij / l;

    let c = l - spring.rest_length;
    let dcdt = dir.dot(v[i] - v[j]);
    let fs = dir * (spring.ke * c + spring.kd * dcdt);

    let f = &ctx.state.particle_forces;
    f.sub(i, fs);
    f.add(j, fs);
}
