// Copyright 2020 TwoCookingMice

use cloudmarch::core::settings::RenderSettings;
use cloudmarch::core::settings_loader::load_settings;
use cloudmarch::core::scene::Scene;
use cloudmarch::integrators::raymarching::RaymarchingIntegrator;
use cloudmarch::io::exr_utils;
use cloudmarch::renderers::simple::{Renderer, SimpleRenderer};
use cloudmarch::sensors::pinhole::PinholeCamera;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Noise cloud lit by a directional light
    Cloud,
    /// Self-emitting homogeneous sphere
    Homogeneous,
}

/// Render a participating medium with unbiased transmittance estimates and
/// write the result as OpenEXR.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// The path of the EXR image to write
    output: PathBuf,
    /// XML settings file; overrides the preset
    #[arg(short = 's', long = "settings")]
    settings: Option<PathBuf>,
    /// Built-in scene used without a settings file
    #[arg(short = 'p', long = "preset", value_enum, default_value_t = Preset::Cloud)]
    preset: Preset,
    /// Base seed of the per-pixel random streams
    #[arg(long = "seed")]
    seed: Option<u64>,
    #[arg(long = "width")]
    width: Option<usize>,
    #[arg(long = "height")]
    height: Option<usize>,
    /// Samples per pixel
    #[arg(long = "spp")]
    spp: Option<u32>,
    /// use specified number of threads for rendering
    #[arg(short = 't', long = "nthreads", default_value_t = 0)]
    nthreads: usize,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => match cli.preset {
            Preset::Cloud => RenderSettings::cloud(),
            Preset::Homogeneous => RenderSettings::homogeneous(),
        },
    };
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    if let Some(width) = cli.width {
        settings.film.width = width;
    }
    if let Some(height) = cli.height {
        settings.film.height = height;
    }
    if let Some(spp) = cli.spp {
        settings.film.samples_per_pixel = spp;
    }
    settings.validate()?;

    let scene = Scene::from_settings(&settings);
    let camera = PinholeCamera::new(settings.film.camera_origin, settings.film.width, settings.film.height);
    let integrator = RaymarchingIntegrator::from_settings(&settings)?;
    let renderer = SimpleRenderer::new(Box::new(integrator), settings.seed).with_threads(cli.nthreads);

    let image = renderer.render(&scene, &camera);
    exr_utils::write_exr_to_file(&image, &cli.output.to_string_lossy())?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
