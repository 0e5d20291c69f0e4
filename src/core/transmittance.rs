// Copyright @yucwang 2026

use crate::core::rng::UniformRandom;
use crate::core::volume::DensityField;
use crate::math::constants::{Float, Vector3f};

/// Estimates `exp(-∫ density)` along the segment `start -> end`.
pub trait Transmittance: Send + Sync {
    fn transmittance(&self,
                     density: &dyn DensityField,
                     start: Vector3f,
                     end: Vector3f,
                     rng: &mut UniformRandom) -> Float;

    fn name(&self) -> &'static str;
}
