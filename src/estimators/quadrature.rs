// Copyright @yucwang 2026

use crate::core::rng::UniformRandom;
use crate::core::transmittance::Transmittance;
use crate::core::volume::DensityField;
use crate::math::constants::{Float, Vector3f};

/// Deterministic midpoint rule, `exp(-density(mid) * L)`.
///
/// Cheap and noise free but biased for any density that varies along the
/// segment. Draws nothing from the stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuadratureTransmittance;

impl Transmittance for QuadratureTransmittance {
    fn transmittance(&self,
                     density: &dyn DensityField,
                     start: Vector3f,
                     end: Vector3f,
                     _rng: &mut UniformRandom) -> Float {
        let length = (end - start).norm();
        if length <= 0.0 {
            return 1.0;
        }
        let mid = (start + end) * 0.5;
        (-density.density(mid) * length).exp()
    }

    fn name(&self) -> &'static str {
        "quadrature"
    }
}
