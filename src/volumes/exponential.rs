// Copyright @yucwang 2026

use crate::core::volume::DensityField;
use crate::math::constants::{Float, Vector3f};

/// `scale * exp(-|p|)`; has no finite bounds.
pub struct ExponentialVolume {
    scale: Float,
}

impl ExponentialVolume {
    pub fn new(scale: Float) -> Self {
        Self { scale }
    }
}

impl DensityField for ExponentialVolume {
    fn density(&self, p_world: Vector3f) -> Float {
        self.scale * (-p_world.norm()).exp()
    }
}
