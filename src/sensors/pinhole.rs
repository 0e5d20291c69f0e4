// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Camera at `origin` looking down `+z` with a 90 degree vertical field of
/// view. Film `v` grows with `+y`.
pub struct PinholeCamera {
    origin: Vector3f,
    aspect: Float,
    width: usize,
    height: usize,
}

impl PinholeCamera {
    pub fn new(origin: Vector3f, width: usize, height: usize) -> Self {
        let aspect = if height == 0 { 1.0 } else { width as Float / height as Float };
        Self { origin, aspect, width, height }
    }
}

impl Sensor for PinholeCamera {
    fn sample_ray(&self, u: &Vector2f) -> Ray3f {
        let px = (2.0 * u.x - 1.0) * self.aspect;
        let py = 2.0 * u.y - 1.0;
        Ray3f::new(self.origin, Vector3f::new(px, py, 1.0), Some(0.0), None)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn describe(&self) -> String {
        format!("PinholeCamera\n  origin: {:?}\n  aspect: {}\n  film: {}x{}",
                self.origin, self.aspect, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinhole_camera_center_ray() {
        let cam = PinholeCamera::new(Vector3f::new(0.0, 0.0, -3.0), 4, 4);
        let ray = cam.sample_ray(&Vector2f::new(0.5, 0.5));
        let dir = ray.dir();
        assert!((dir.x - 0.0).abs() < 1e-6);
        assert!((dir.y - 0.0).abs() < 1e-6);
        assert!((dir.z - 1.0).abs() < 1e-6);
        assert_eq!(ray.origin(), Vector3f::new(0.0, 0.0, -3.0));
    }

    #[test]
    fn test_pinhole_camera_corner_uses_aspect() {
        let cam = PinholeCamera::new(Vector3f::zeros(), 200, 100);
        let ray = cam.sample_ray(&Vector2f::new(0.0, 1.0));
        let expected = Vector3f::new(-2.0, 1.0, 1.0).normalize();
        assert!((ray.dir() - expected).norm() < 1e-6);
        assert_eq!(cam.width(), 200);
        assert_eq!(cam.height(), 100);
    }
}
