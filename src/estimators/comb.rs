// Copyright @yucwang 2026

use crate::core::rng::UniformRandom;
use crate::core::volume::DensityField;
use crate::math::constants::{Float, Vector3f};

/// One randomized comb quadrature of the optical depth over `start -> end`.
///
/// `comb_samples` evenly spaced positions share a single random phase drawn
/// from `rng`; positions wrap modulo the segment length. Returns the negative
/// optical depth `-tau`. Consumes exactly one draw and evaluates the density
/// `comb_samples` times.
///
/// The phase is drawn over the stream's full range and wrapped into
/// `[0, L)`, not drawn over `[0, L / M)`. Streams with negative ranges wrap
/// the same way.
pub fn comb_estimate<D: DensityField + ?Sized>(start: &Vector3f,
                                               end: &Vector3f,
                                               comb_samples: usize,
                                               density: &D,
                                               rng: &mut UniformRandom) -> Float {
    let delta = end - start;
    let length = delta.norm();
    let r = rng.next_f32();
    if length <= 0.0 {
        return 0.0;
    }

    let dir = delta / length;
    let step = length / comb_samples as Float;
    let mut tau = 0.0;
    for j in 0..comb_samples {
        let t_j = (r + j as Float * step).rem_euclid(length);
        tau += density.density(start + dir * t_j) * step;
    }

    -tau
}
