// Copyright @yucwang 2026

use crate::core::emitter::{Emission, MediumQuery};
use crate::core::rng::UniformRandom;
use crate::math::bounds::BoundingSphere;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;

/// Fixed radiance everywhere inside a sphere.
pub struct ConstantEmission {
    radiance: RGBSpectrum,
    region: BoundingSphere,
}

impl ConstantEmission {
    pub fn new(radiance: RGBSpectrum, radius: Float) -> Self {
        Self { radiance, region: BoundingSphere::centered(radius) }
    }
}

impl Emission for ConstantEmission {
    fn eval(&self,
            _query: &MediumQuery,
            p_world: Vector3f,
            _dir: Vector3f,
            _rng: &mut UniformRandom) -> RGBSpectrum {
        if self.region.contains(&p_world) {
            self.radiance
        } else {
            RGBSpectrum::default()
        }
    }
}
