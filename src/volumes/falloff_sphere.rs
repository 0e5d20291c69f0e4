// Copyright @yucwang 2026

use crate::core::volume::DensityField;
use crate::math::bounds::BoundingSphere;
use crate::math::constants::{Float, Vector3f};
use crate::volumes::sphere_falloff;

/// Density `1 - |p| / radius`, densest at the center.
pub struct FalloffSphereVolume {
    radius: Float,
}

impl FalloffSphereVolume {
    pub fn new(radius: Float) -> Self {
        Self { radius }
    }
}

impl DensityField for FalloffSphereVolume {
    fn density(&self, p_world: Vector3f) -> Float {
        sphere_falloff(&p_world, self.radius)
    }

    fn bounds(&self) -> Option<BoundingSphere> {
        Some(BoundingSphere::centered(self.radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_falloff() {
        let vol = FalloffSphereVolume::new(2.0);
        assert_eq!(vol.density(Vector3f::zeros()), 1.0);
        assert!((vol.density(Vector3f::new(1.0, 0.0, 0.0)) - 0.5).abs() < 1e-6);
        assert_eq!(vol.density(Vector3f::new(0.0, 3.0, 0.0)), 0.0);
    }
}
