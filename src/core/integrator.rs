// Copyright @yucwang 2026

use crate::core::rng::UniformRandom;
use crate::core::scene::Scene;
use crate::math::constants::{Float, Vector4f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchResult {
    pub radiance: RGBSpectrum,
    pub transmittance: Float,
    pub steps: usize,
}

impl MarchResult {
    pub fn alpha(&self) -> Float {
        1.0 - self.transmittance
    }

    pub fn to_rgba(&self) -> Vector4f {
        Vector4f::new(self.radiance[0], self.radiance[1], self.radiance[2], self.alpha())
    }
}

pub trait Integrator: Sync {
    fn trace_ray(&self, scene: &Scene, ray: &Ray3f, rng: &mut UniformRandom) -> MarchResult;
    fn samples_per_pixel(&self) -> u32;
}
