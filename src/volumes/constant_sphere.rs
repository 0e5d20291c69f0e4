// Copyright @yucwang 2026

use crate::core::volume::DensityField;
use crate::math::bounds::BoundingSphere;
use crate::math::constants::{Float, Vector3f};

/// Homogeneous ball: `density` inside `bounds`, zero outside.
pub struct ConstantSphereVolume {
    density: Float,
    bounds: BoundingSphere,
}

impl ConstantSphereVolume {
    pub fn new(density: Float, radius: Float) -> Self {
        Self { density, bounds: BoundingSphere::centered(radius) }
    }

    pub fn with_bounds(mut self, bounds: BoundingSphere) -> Self {
        self.bounds = bounds;
        self
    }
}

impl DensityField for ConstantSphereVolume {
    fn density(&self, p_world: Vector3f) -> Float {
        if self.bounds.contains(&p_world) {
            self.density
        } else {
            0.0
        }
    }

    fn bounds(&self) -> Option<BoundingSphere> {
        Some(self.bounds)
    }
}
