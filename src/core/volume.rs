// Copyright @yucwang 2026

use crate::math::bounds::BoundingSphere;
use crate::math::constants::{Float, Vector3f};

/// Scalar extinction coefficient over space.
///
/// Implementations must be pure and return non-negative values. They are
/// queried by both primary-ray and shadow-ray transmittance estimation.
pub trait DensityField: Send + Sync {
    fn density(&self, p_world: Vector3f) -> Float;

    /// Region outside of which `density` is zero, if known.
    fn bounds(&self) -> Option<BoundingSphere> {
        None
    }
}

impl<F> DensityField for F
where
    F: Fn(Vector3f) -> Float + Send + Sync,
{
    fn density(&self, p_world: Vector3f) -> Float {
        self(p_world)
    }
}
