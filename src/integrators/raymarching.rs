// Copyright @yucwang 2026

use crate::core::emitter::MediumQuery;
use crate::core::integrator::{Integrator, MarchResult};
use crate::core::rng::UniformRandom;
use crate::core::scene::Scene;
use crate::core::settings::{ConfigError, MarchSettings, RenderSettings, TransmittanceMethod};
use crate::core::transmittance::Transmittance;
use crate::estimators::{PowerSeriesEstimator, QuadratureTransmittance};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Emission-absorption ray marcher.
///
/// Walks `[t_min, t_max)` in steps of `step_size`. Each step whose start lies
/// inside the medium bounds multiplies the running transmittance by the
/// segment estimate `T` and adds `running * (1 - T) * emission(end)`.
pub struct RaymarchingIntegrator {
    march: MarchSettings,
    samples_per_pixel: u32,
    transmittance: Box<dyn Transmittance>,
}

impl RaymarchingIntegrator {
    pub fn new(march: MarchSettings,
               samples_per_pixel: u32,
               transmittance: Box<dyn Transmittance>) -> Result<Self, ConfigError> {
        march.validate()?;
        Ok(Self { march, samples_per_pixel, transmittance })
    }

    pub fn from_settings(settings: &RenderSettings) -> Result<Self, ConfigError> {
        let transmittance: Box<dyn Transmittance> = match settings.transmittance {
            TransmittanceMethod::PowerSeries => Box::new(PowerSeriesEstimator::new(&settings.estimator)?),
            TransmittanceMethod::Quadrature => Box::new(QuadratureTransmittance),
        };
        log::debug!("Raymarching with {} transmittance, {:?}.", transmittance.name(), settings.march);
        Self::new(settings.march, settings.film.samples_per_pixel, transmittance)
    }

    pub fn march_settings(&self) -> &MarchSettings {
        &self.march
    }

    pub fn transmittance(&self) -> &dyn Transmittance {
        self.transmittance.as_ref()
    }
}

impl Integrator for RaymarchingIntegrator {
    fn trace_ray(&self, scene: &Scene, ray: &Ray3f, rng: &mut UniformRandom) -> MarchResult {
        let density = scene.density();
        let query = MediumQuery::new(density, self.transmittance.as_ref());
        let bounds = density.bounds();
        let dt = self.march.step_size;

        let mut t = self.march.t_min;
        let mut beta = 1.0;
        let mut color = RGBSpectrum::default();
        let mut steps = 0;

        while t < self.march.t_max && beta > self.march.min_transmittance && steps < self.march.max_steps {
            let (start, end) = ray.segment(t, dt);
            t += dt;
            steps += 1;

            if let Some(bounds) = bounds {
                if !bounds.contains(&start) {
                    continue;
                }
            }

            let segment_t = self.transmittance.transmittance(density, start, end, rng);
            beta *= segment_t;

            let le = scene.emission().eval(&query, end, ray.dir(), rng);
            color += le * (beta * (1.0 - segment_t));
        }

        MarchResult { radiance: color, transmittance: beta, steps }
    }

    fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::EstimatorSettings;
    use crate::emitters::constant::ConstantEmission;
    use crate::math::constants::{Float, Vector3f};
    use crate::volumes::constant_sphere::ConstantSphereVolume;
    use std::sync::Arc;

    fn homogeneous_scene(density: Float) -> Scene {
        Scene::new(Arc::new(ConstantSphereVolume::new(density, 2.0)),
                   Arc::new(ConstantEmission::new(RGBSpectrum::new(1.0, 0.5, 0.35), 2.0)))
    }

    fn through_center() -> Ray3f {
        Ray3f::new(Vector3f::new(0.0, 0.0, -2.0), Vector3f::new(0.0, 0.0, 1.0), None, None)
    }

    fn march(t_max: Float) -> MarchSettings {
        MarchSettings { t_max, ..MarchSettings::default() }
    }

    fn power_series() -> Box<dyn Transmittance> {
        Box::new(PowerSeriesEstimator::new(&EstimatorSettings::default()).unwrap())
    }

    #[test]
    fn homogeneous_sphere_alpha() {
        let integrator = RaymarchingIntegrator::new(march(4.0), 1, power_series()).unwrap();
        let scene = homogeneous_scene(0.8);
        let mut rng = UniformRandom::new(42, 0.0, 1.0);
        let result = integrator.trace_ray(&scene, &through_center(), &mut rng);
        assert!((result.alpha() - (1.0 - (-3.2f32).exp())).abs() < 1e-3, "alpha = {}", result.alpha());

        // Emission-absorption with constant emission integrates to (1 - T) * Le.
        let expected = 1.0 - (-3.2f32).exp();
        assert!((result.radiance[0] - expected * (-0.016f32).exp()).abs() < 1e-2, "r = {}", result.radiance[0]);
    }

    #[test]
    fn misses_leave_ray_transparent_and_rng_untouched() {
        let integrator = RaymarchingIntegrator::new(march(5.0), 1, power_series()).unwrap();
        let scene = homogeneous_scene(0.8);
        let ray = Ray3f::new(Vector3f::new(0.0, 3.0, -3.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let mut used = UniformRandom::new(5, 0.0, 1.0);
        let mut fresh = UniformRandom::new(5, 0.0, 1.0);
        let result = integrator.trace_ray(&scene, &ray, &mut used);
        assert_eq!(result.transmittance, 1.0);
        assert_eq!(result.alpha(), 0.0);
        assert!(result.radiance.is_black());
        assert_eq!(used.next_f32(), fresh.next_f32());
    }

    #[test]
    fn opaque_medium_terminates_early() {
        let integrator = RaymarchingIntegrator::new(march(4.0), 1, power_series()).unwrap();
        let scene = homogeneous_scene(50.0);
        let mut rng = UniformRandom::new(42, 0.0, 1.0);
        let result = integrator.trace_ray(&scene, &through_center(), &mut rng);
        assert!(result.transmittance <= 0.001);
        assert!(result.steps < 20, "steps = {}", result.steps);
    }

    #[test]
    fn step_cap_bounds_the_march() {
        let settings = MarchSettings { t_max: 4.0, max_steps: 10, ..MarchSettings::default() };
        let integrator = RaymarchingIntegrator::new(settings, 1, power_series()).unwrap();
        let scene = homogeneous_scene(0.8);
        let mut rng = UniformRandom::new(42, 0.0, 1.0);
        let result = integrator.trace_ray(&scene, &through_center(), &mut rng);
        assert_eq!(result.steps, 10);
        assert!((result.transmittance - (-0.16f32).exp()).abs() < 1e-4);
    }

    #[test]
    fn same_seed_same_result() {
        let integrator = RaymarchingIntegrator::from_settings(&RenderSettings::cloud()).unwrap();
        let scene = Scene::from_settings(&RenderSettings::cloud());
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, -3.0), Vector3f::new(0.1, -0.2, 1.0), None, None);
        let mut a = UniformRandom::new(42, 0.0, 1.0);
        let mut b = UniformRandom::new(42, 0.0, 1.0);
        let first = integrator.trace_ray(&scene, &ray, &mut a);
        let second = integrator.trace_ray(&scene, &ray, &mut b);
        assert_eq!(first, second);
        assert!(first.radiance.is_finite());
        assert!(first.alpha() > 0.0 && first.alpha() <= 1.0);
    }

    #[test]
    fn invalid_march_is_rejected() {
        let settings = MarchSettings { step_size: 0.0, ..MarchSettings::default() };
        assert!(RaymarchingIntegrator::new(settings, 1, power_series()).is_err());
    }
}
