// Copyright @yucwang 2026

use crate::core::volume::DensityField;
use crate::math::bounds::BoundingSphere;
use crate::math::constants::{Float, Vector3f};
use std::sync::Arc;

/// Another field with its density multiplied by `scale`.
pub struct ScaledVolume {
    inner: Arc<dyn DensityField>,
    scale: Float,
}

impl ScaledVolume {
    pub fn new(inner: Arc<dyn DensityField>, scale: Float) -> Self {
        Self { inner, scale: scale.max(0.0) }
    }
}

impl DensityField for ScaledVolume {
    fn density(&self, p_world: Vector3f) -> Float {
        self.inner.density(p_world) * self.scale
    }

    fn bounds(&self) -> Option<BoundingSphere> {
        self.inner.bounds()
    }
}
