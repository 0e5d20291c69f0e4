// Copyright @yucwang 2026

use crate::math::constants::Float;

pub trait PhaseFunction: Send + Sync {
    /// Density over the sphere of directions, as a function of the cosine
    /// between the propagation and light directions.
    fn eval(&self, cos_theta: Float) -> Float;
}
