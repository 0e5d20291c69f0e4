// Copyright @yucwang 2026

use crate::core::volume::DensityField;
use crate::math::bounds::BoundingSphere;
use crate::math::constants::{Float, Vector3f};
use crate::volumes::noise::GradientNoise;
use crate::volumes::sphere_falloff;

/// Fractal noise remapped to `[0, 1]` and faded out linearly toward the
/// boundary sphere.
pub struct NoiseCloudVolume {
    noise: GradientNoise,
    radius: Float,
    octaves: u32,
    frequency: Float,
}

impl NoiseCloudVolume {
    pub fn new(seed: u64, radius: Float, octaves: u32, frequency: Float) -> Self {
        Self { noise: GradientNoise::new(seed), radius, octaves, frequency }
    }
}

impl DensityField for NoiseCloudVolume {
    fn density(&self, p_world: Vector3f) -> Float {
        let base = self.noise.fbm(&p_world, self.octaves, self.frequency);
        let d = ((base + 1.0) * 0.5).clamp(0.0, 1.0);
        d * sphere_falloff(&p_world, self.radius)
    }

    fn bounds(&self) -> Option<BoundingSphere> {
        Some(BoundingSphere::centered(self.radius))
    }
}
