// Copyright @yucwang 2026

use cloudmarch::core::scene::Scene;
use cloudmarch::core::settings::RenderSettings;
use cloudmarch::core::settings_loader::load_settings;
use cloudmarch::integrators::raymarching::RaymarchingIntegrator;
use cloudmarch::renderers::simple::SimpleRenderer;
use cloudmarch::sensors::pinhole::PinholeCamera;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Trace a single pixel exactly as the full render would and print it.
#[derive(Parser)]
struct Cli {
    x: usize,
    y: usize,
    /// XML settings file; the cloud preset otherwise
    #[arg(short = 's', long = "settings")]
    settings: Option<PathBuf>,
    #[arg(long = "seed")]
    seed: Option<u64>,
    #[arg(long = "spp")]
    spp: Option<u32>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => match load_settings(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => RenderSettings::cloud(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    if let Some(spp) = cli.spp {
        settings.film.samples_per_pixel = spp;
    }
    if cli.x >= settings.film.width || cli.y >= settings.film.height {
        log::error!("pixel ({}, {}) is outside the {}x{} film", cli.x, cli.y, settings.film.width, settings.film.height);
        return ExitCode::FAILURE;
    }

    let integrator = match RaymarchingIntegrator::from_settings(&settings) {
        Ok(integrator) => integrator,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let scene = Scene::from_settings(&settings);
    let camera = PinholeCamera::new(settings.film.camera_origin, settings.film.width, settings.film.height);
    let renderer = SimpleRenderer::new(Box::new(integrator), settings.seed);

    let raw = renderer.trace_pixel(&scene, &camera, cli.x, cli.y);
    let pixel = renderer.render_pixel(&scene, &camera, cli.x, cli.y);
    println!("Pixel ({}, {}), seed {}", cli.x, cli.y, settings.seed);
    println!("Radiance: {:.6}, {:.6}, {:.6}", raw.x, raw.y, raw.z);
    println!("Alpha: {:.6}", raw.w);
    println!("Composited: {:.6}, {:.6}, {:.6}", pixel.x, pixel.y, pixel.z);
    ExitCode::SUCCESS
}
