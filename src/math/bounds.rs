// Copyright @yucwang 2026

use super::constants::{Float, Vector3f};

/// Spherical region outside of which a medium has no density.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingSphere {
    pub center: Vector3f,
    pub radius: Float
}

impl BoundingSphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius: radius.abs() }
    }

    pub fn centered(radius: Float) -> Self {
        Self::new(Vector3f::zeros(), radius)
    }

    /// Points on the surface count as inside.
    pub fn contains(&self, p: &Vector3f) -> bool {
        (p - self.center).norm() <= self.radius
    }
}
