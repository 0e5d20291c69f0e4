// Copyright @yucwang 2026

use cloudmarch::core::integrator::Integrator;
use cloudmarch::core::rng::UniformRandom;
use cloudmarch::core::scene::Scene;
use cloudmarch::core::settings::{MarchSettings, RenderSettings};
use cloudmarch::integrators::raymarching::RaymarchingIntegrator;
use cloudmarch::math::constants::Vector3f;
use cloudmarch::math::ray::Ray3f;
use cloudmarch::renderers::simple::{Renderer, SimpleRenderer};
use cloudmarch::sensors::pinhole::PinholeCamera;

#[test]
fn homogeneous_sphere_alpha_over_many_seeds() {
    let mut settings = RenderSettings::homogeneous();
    settings.march = MarchSettings {
        step_size: 0.02,
        t_min: 0.0,
        t_max: 4.0,
        min_transmittance: 0.001,
        max_steps: 512,
    };
    let scene = Scene::from_settings(&settings);
    let integrator = RaymarchingIntegrator::from_settings(&settings).unwrap();
    let ray = Ray3f::new(Vector3f::new(0.0, 0.0, -2.0), Vector3f::new(0.0, 0.0, 1.0), Some(0.0), None);

    let seeds = 10_000;
    let mut sum = 0.0f64;
    for seed in 0..seeds {
        let mut rng = UniformRandom::new(seed, 0.0, 1.0);
        sum += integrator.trace_ray(&scene, &ray, &mut rng).alpha() as f64;
    }
    let mean = sum / seeds as f64;
    let expected = 1.0 - (-3.2f64).exp();
    assert!((mean - expected).abs() < 0.02 * expected, "mean alpha = {}", mean);
}

#[test]
fn cloud_render_is_reproducible() {
    let mut settings = RenderSettings::cloud();
    settings.film.width = 8;
    settings.film.height = 8;
    let scene = Scene::from_settings(&settings);
    let camera = PinholeCamera::new(settings.film.camera_origin, 8, 8);

    let render = |seed: u64, threads: usize| {
        let integrator = RaymarchingIntegrator::from_settings(&settings).unwrap();
        SimpleRenderer::new(Box::new(integrator), seed)
            .with_threads(threads)
            .render(&scene, &camera)
    };

    let a = render(42, 1);
    let b = render(42, 4);
    assert_eq!(a.pixels(), b.pixels());
    assert!(a.pixels().iter().all(|p| p.iter().all(|c| c.is_finite())));
    assert!(a.pixels().iter().all(|p| p.w == 1.0));

    let c = render(43, 2);
    assert_ne!(a.pixels(), c.pixels());
}

#[test]
fn cloud_center_is_denser_than_the_edge() {
    let settings = RenderSettings::cloud();
    let scene = Scene::from_settings(&settings);
    let camera = PinholeCamera::new(settings.film.camera_origin, 16, 16);
    let integrator = RaymarchingIntegrator::from_settings(&settings).unwrap();
    let renderer = SimpleRenderer::new(Box::new(integrator), settings.seed);

    let center = renderer.trace_pixel(&scene, &camera, 8, 8);
    let corner = renderer.trace_pixel(&scene, &camera, 0, 0);
    assert!(center.w >= corner.w);
    assert_eq!(corner.w, 0.0);
}
