// Copyright @yucwang 2026

use crate::core::rng::UniformRandom;
use crate::core::transmittance::Transmittance;
use crate::core::volume::DensityField;
use crate::math::bounds::BoundingSphere;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;

/// Handle an emission model uses to ask for shadow transmittance.
///
/// Queries go through the same estimator as the primary ray and draw from the
/// same stream.
pub struct MediumQuery<'a> {
    density: &'a dyn DensityField,
    transmittance: &'a dyn Transmittance,
}

impl<'a> MediumQuery<'a> {
    pub fn new(density: &'a dyn DensityField, transmittance: &'a dyn Transmittance) -> Self {
        Self { density, transmittance }
    }

    pub fn density(&self, p_world: Vector3f) -> Float {
        self.density.density(p_world)
    }

    pub fn bounds(&self) -> Option<BoundingSphere> {
        self.density.bounds()
    }

    pub fn transmittance(&self, start: Vector3f, end: Vector3f, rng: &mut UniformRandom) -> Float {
        self.transmittance.transmittance(self.density, start, end, rng)
    }
}

/// Radiance emitted toward `-dir` at `p_world`.
pub trait Emission: Send + Sync {
    fn eval(&self,
            query: &MediumQuery,
            p_world: Vector3f,
            dir: Vector3f,
            rng: &mut UniformRandom) -> RGBSpectrum;
}
