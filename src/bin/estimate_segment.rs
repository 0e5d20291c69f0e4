// Copyright @yucwang 2026

use cloudmarch::core::rng::UniformRandom;
use cloudmarch::core::settings::EstimatorSettings;
use cloudmarch::core::volume::DensityField;
use cloudmarch::estimators::PowerSeriesEstimator;
use cloudmarch::math::constants::{Float, Vector3f};
use cloudmarch::volumes::constant_sphere::ConstantSphereVolume;
use cloudmarch::volumes::exponential::ExponentialVolume;
use cloudmarch::volumes::falloff_sphere::FalloffSphereVolume;
use cloudmarch::volumes::noise_cloud::NoiseCloudVolume;

use clap::{Parser, ValueEnum};
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Medium {
    /// 0.5 + z
    Linear,
    Constant,
    Falloff,
    Exponential,
    Noise,
}

/// Average many transmittance estimates of one segment and compare them
/// with exp(-tau) from a fine midpoint sum.
#[derive(Parser)]
struct Cli {
    #[arg(long = "medium", value_enum, default_value_t = Medium::Linear)]
    medium: Medium,
    /// Segment start, "x,y,z"
    #[arg(long = "start", default_value = "0,0,0")]
    start: String,
    /// Segment end, "x,y,z"
    #[arg(long = "end", default_value = "0,0,1")]
    end: String,
    #[arg(short = 'n', long = "trials", default_value_t = 100_000)]
    trials: u64,
    #[arg(long = "seed", default_value_t = 42)]
    seed: u64,
    #[arg(long = "baseline", default_value_t = 3)]
    baseline_samples: usize,
    #[arg(long = "roulette", default_value_t = 2.5)]
    roulette: Float,
    #[arg(long = "comb", default_value_t = 12)]
    comb_samples: usize,
}

struct Linear;

impl DensityField for Linear {
    fn density(&self, p: Vector3f) -> Float {
        0.5 + p.z
    }
}

fn parse_point(value: &str) -> Result<Vector3f, String> {
    let parts: Vec<Float> = value
        .split(',')
        .map(|s| s.trim().parse::<Float>().map_err(|_| format!("invalid point: {}", value)))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vector3f::new(*x, *y, *z)),
        _ => Err(format!("invalid point: {}", value)),
    }
}

fn optical_depth(density: &dyn DensityField, start: &Vector3f, end: &Vector3f) -> f64 {
    let steps = 100_000;
    let delta = end - start;
    let mut sum = 0.0f64;
    for i in 0..steps {
        let t = (i as Float + 0.5) / steps as Float;
        sum += density.density(start + delta * t) as f64;
    }
    sum / steps as f64 * delta.norm() as f64
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let (start, end) = match (parse_point(&cli.start), parse_point(&cli.end)) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(e), _) | (_, Err(e)) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let settings = EstimatorSettings {
        baseline_samples: cli.baseline_samples,
        roulette: cli.roulette,
        comb_samples: cli.comb_samples,
    };
    let estimator = match PowerSeriesEstimator::new(&settings) {
        Ok(estimator) => estimator,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let density: Box<dyn DensityField> = match cli.medium {
        Medium::Linear => Box::new(Linear),
        Medium::Constant => Box::new(ConstantSphereVolume::new(0.8, 2.0)),
        Medium::Falloff => Box::new(FalloffSphereVolume::new(2.0)),
        Medium::Exponential => Box::new(ExponentialVolume::new(1.0)),
        Medium::Noise => Box::new(NoiseCloudVolume::new(1337, 2.0, 5, 0.5)),
    };

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut samples = 0usize;
    for trial in 0..cli.trials {
        let mut rng = UniformRandom::for_stream(cli.seed, trial);
        if let Some(set) = estimator.sample_set(&start, &end, density.as_ref(), &mut rng) {
            samples += set.len();
        }
        let mut rng = UniformRandom::for_stream(cli.seed, trial);
        let t = estimator.estimate(&start, &end, density.as_ref(), &mut rng) as f64;
        sum += t;
        sum_sq += t * t;
    }

    let n = cli.trials.max(1) as f64;
    let mean = sum / n;
    let variance = (sum_sq / n - mean * mean).max(0.0);
    let std_err = (variance / n).sqrt();
    let reference = (-optical_depth(density.as_ref(), &start, &end)).exp();

    println!("Medium: {:?}, segment {:?} -> {:?}", cli.medium, start, end);
    println!("Trials: {}, mean samples per estimate: {:.3}", cli.trials, samples as f64 / n);
    println!("Mean: {:.6} +- {:.6} (std err)", mean, std_err);
    println!("exp(-tau): {:.6}", reference);
    if std_err > 0.0 {
        println!("z-score: {:.3}", (mean - reference) / std_err);
    }
    ExitCode::SUCCESS
}
