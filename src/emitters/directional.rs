// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;

/// Light arriving from infinitely far away. `direction` points from the
/// medium toward the light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    direction: Vector3f,
    pub irradiance: RGBSpectrum,
}

impl DirectionalLight {
    pub fn new_with(direction: Vector3f, irradiance: RGBSpectrum) -> Self {
        let len = direction.norm();
        let direction = if len <= 0.0 {
            Vector3f::new(0.0, 0.0, -1.0)
        } else {
            direction / len
        };
        Self { direction, irradiance }
    }

    pub fn direction(&self) -> Vector3f {
        self.direction
    }

    /// Cosine between a propagation direction and the light direction.
    pub fn cos_theta(&self, dir: &Vector3f) -> Float {
        dir.dot(&self.direction)
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new_with(Vector3f::new(0.0, 0.0, -1.0), RGBSpectrum::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let light = DirectionalLight::new_with(Vector3f::new(0.0, 3.0, 4.0), RGBSpectrum::splat(1.0));
        assert!((light.direction().norm() - 1.0).abs() < 1e-6);
        assert!((light.cos_theta(&Vector3f::new(0.0, 1.0, 0.0)) - 0.6).abs() < 1e-6);

        let fallback = DirectionalLight::new_with(Vector3f::zeros(), RGBSpectrum::splat(1.0));
        assert_eq!(fallback.direction(), Vector3f::new(0.0, 0.0, -1.0));
        assert_eq!(DirectionalLight::default().direction(), Vector3f::new(0.0, 0.0, -1.0));
    }
}
