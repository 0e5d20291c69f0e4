// Copyright @yucwang 2026

use crate::core::phase::PhaseFunction;
use crate::math::constants::{Float, INV_FOUR_PI};

/// Henyey-Greenstein lobe with asymmetry `g` in `(-1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HenyeyGreenstein {
    g: Float,
}

impl HenyeyGreenstein {
    pub fn new(g: Float) -> Self {
        Self { g }
    }

    pub fn g(&self) -> Float {
        self.g
    }
}

impl PhaseFunction for HenyeyGreenstein {
    fn eval(&self, cos_theta: Float) -> Float {
        let g = self.g;
        let denom = 1.0 + g * g - 2.0 * g * cos_theta;
        INV_FOUR_PI * (1.0 - g * g) / (denom * denom.sqrt())
    }
}
