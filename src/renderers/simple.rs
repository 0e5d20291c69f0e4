// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::rng::UniformRandom;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2f, Vector4f};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

pub use super::renderer::Renderer;

/// Block-parallel renderer.
///
/// Every pixel draws from its own stream, selected by the pixel's linear
/// index under the base seed, so the image does not depend on the number of
/// threads or on the order in which blocks finish.
pub struct SimpleRenderer {
    integrator: Box<dyn Integrator>,
    seed: u64,
    block_size: usize,
    thread_count: Option<usize>,
}

impl SimpleRenderer {
    pub fn new(integrator: Box<dyn Integrator>, seed: u64) -> Self {
        Self {
            integrator,
            seed,
            block_size: 32,
            thread_count: None,
        }
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.thread_count = if threads == 0 { None } else { Some(threads) };
        self
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    /// Averaged `(radiance, alpha)` of pixel `(x, y)` before compositing.
    pub fn trace_pixel(&self, scene: &Scene, sensor: &dyn Sensor, x: usize, y: usize) -> Vector4f {
        let width = sensor.width();
        let height = sensor.height();
        let spp = self.integrator.samples_per_pixel().max(1);
        let mut rng = UniformRandom::for_stream(self.seed, (x + width * y) as u64);
        let film = Vector2f::new(x as Float / width as Float, y as Float / height as Float);
        let ray = sensor.sample_ray(&film);

        let mut accum = Vector4f::zeros();
        for _ in 0..spp {
            accum += self.integrator.trace_ray(scene, &ray, &mut rng).to_rgba();
        }
        accum / spp as Float
    }

    /// Pixel `(x, y)` composited over the scene background, alpha one.
    pub fn render_pixel(&self, scene: &Scene, sensor: &dyn Sensor, x: usize, y: usize) -> Vector4f {
        let raw = self.trace_pixel(scene, sensor, x, y);
        let alpha = raw.w;
        let bg = scene.background();
        Vector4f::new(raw.x * alpha + bg[0] * (1.0 - alpha),
                      raw.y * alpha + bg[1] * (1.0 - alpha),
                      raw.z * alpha + bg[2] * (1.0 - alpha),
                      1.0)
    }
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &Scene, sensor: &dyn Sensor) -> Bitmap {
        let (width, height) = (sensor.width(), sensor.height());
        if width == 0 || height == 0 {
            return Bitmap::new(0, 0);
        }

        let block_size = self.block_size;
        let blocks_x = (width + block_size - 1) / block_size;
        let blocks_y = (height + block_size - 1) / block_size;
        let total_blocks = blocks_x * blocks_y;

        let progress = ProgressBar::new(total_blocks as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_block = Arc::new(AtomicUsize::new(0));
        let thread_count = self.thread_count.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        log::info!("Rendering {}x{} with {} threads, {}.", width, height, thread_count, sensor.describe());
        let start = Instant::now();

        let (tx, rx) = mpsc::channel::<(usize, usize, usize, usize, Vec<Vector4f>)>();
        let mut output = Bitmap::new(width, height);

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_block = Arc::clone(&next_block);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let block_index = next_block.fetch_add(1, Ordering::Relaxed);
                        if block_index >= total_blocks {
                            break;
                        }

                        let bx = block_index % blocks_x;
                        let by = block_index / blocks_x;
                        let x0 = bx * block_size;
                        let y0 = by * block_size;
                        let x1 = (x0 + block_size).min(width);
                        let y1 = (y0 + block_size).min(height);

                        let mut block = Vec::with_capacity((x1 - x0) * (y1 - y0));
                        for y in y0..y1 {
                            for x in x0..x1 {
                                block.push(self.render_pixel(scene, sensor, x, y));
                            }
                        }
                        if tx.send((x0, y0, x1, y1, block)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for _ in 0..total_blocks {
                if let Ok((x0, y0, x1, y1, block)) = rx.recv() {
                    for y in y0..y1 {
                        for x in x0..x1 {
                            output[(x, y)] = block[(x - x0) + (x1 - x0) * (y - y0)];
                        }
                    }
                    progress.inc(1);
                }
            }
        });
        progress.finish_and_clear();
        log::info!("Rendered {} blocks in {:.2?}.", total_blocks, start.elapsed());

        let non_finite = output.pixels().iter().filter(|p| !p.iter().all(|c| c.is_finite())).count();
        if non_finite > 0 {
            log::warn!("{} of {} pixels are not finite.", non_finite, width * height);
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::RenderSettings;
    use crate::integrators::raymarching::RaymarchingIntegrator;
    use crate::sensors::pinhole::PinholeCamera;

    fn small_homogeneous() -> (RenderSettings, Scene, PinholeCamera) {
        let mut settings = RenderSettings::homogeneous();
        settings.film.width = 12;
        settings.film.height = 10;
        let scene = Scene::from_settings(&settings);
        let camera = PinholeCamera::new(settings.film.camera_origin, settings.film.width, settings.film.height);
        (settings, scene, camera)
    }

    #[test]
    fn image_is_independent_of_thread_count() {
        let (settings, scene, camera) = small_homogeneous();
        let single = SimpleRenderer::new(Box::new(RaymarchingIntegrator::from_settings(&settings).unwrap()), 42)
            .with_threads(1)
            .with_block_size(4);
        let multi = SimpleRenderer::new(Box::new(RaymarchingIntegrator::from_settings(&settings).unwrap()), 42)
            .with_threads(3)
            .with_block_size(5);
        let a = single.render(&scene, &camera);
        let b = multi.render(&scene, &camera);
        assert_eq!(a.width(), 12);
        assert_eq!(a.height(), 10);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn render_matches_render_pixel() {
        let (settings, scene, camera) = small_homogeneous();
        let renderer = SimpleRenderer::new(Box::new(RaymarchingIntegrator::from_settings(&settings).unwrap()), 7)
            .with_threads(2);
        let image = renderer.render(&scene, &camera);
        for (x, y) in [(0, 0), (6, 5), (11, 9)] {
            assert_eq!(image[(x, y)], renderer.render_pixel(&scene, &camera, x, y));
            assert_eq!(image[(x, y)].w, 1.0);
        }
    }

    #[test]
    fn corner_pixels_see_the_background() {
        let (settings, scene, camera) = small_homogeneous();
        let renderer = SimpleRenderer::new(Box::new(RaymarchingIntegrator::from_settings(&settings).unwrap()), 7);
        // The corner ray passes the sphere by; nothing is absorbed.
        let raw = renderer.trace_pixel(&scene, &camera, 0, 0);
        assert_eq!(raw.w, 0.0);
        let pixel = renderer.render_pixel(&scene, &camera, 0, 0);
        assert!((pixel.x - 0.5).abs() < 1e-6);
        assert!((pixel.y - 0.7).abs() < 1e-6);
        assert!((pixel.z - 1.0).abs() < 1e-6);
    }
}
