// Copyright @yucwang 2026

pub mod constant_sphere;
pub mod exponential;
pub mod falloff_sphere;
pub mod noise;
pub mod noise_cloud;
pub mod scaled;

use crate::math::constants::{Float, Vector3f};

/// `clamp(1 - |p| / radius, 0, 1)`.
pub(crate) fn sphere_falloff(p: &Vector3f, radius: Float) -> Float {
    (1.0 - p.norm() / radius).clamp(0.0, 1.0)
}
