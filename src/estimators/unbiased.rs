// Copyright @yucwang 2026

use crate::core::rng::UniformRandom;
use crate::core::settings::{ConfigError, EstimatorSettings};
use crate::core::transmittance::Transmittance;
use crate::core::volume::DensityField;
use crate::estimators::power_series::compute_transmittance;
use crate::estimators::roulette::{RouletteScheduler, SampleSet};
use crate::math::constants::{Float, Vector3f};

/// Comb sampling, roulette scheduling and the power-series correction,
/// composed into an estimate of segment transmittance whose expectation over
/// the random stream is exactly `exp(-tau)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSeriesEstimator {
    scheduler: RouletteScheduler,
}

impl PowerSeriesEstimator {
    pub fn new(settings: &EstimatorSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            scheduler: RouletteScheduler::new(settings.baseline_samples,
                                              settings.roulette,
                                              settings.comb_samples),
        })
    }

    pub fn scheduler(&self) -> &RouletteScheduler {
        &self.scheduler
    }

    /// Transmittance of `start -> end`. A zero-length segment is fully
    /// transparent and leaves `rng` untouched.
    pub fn estimate<D: DensityField + ?Sized>(&self,
                                              start: &Vector3f,
                                              end: &Vector3f,
                                              density: &D,
                                              rng: &mut UniformRandom) -> Float {
        match self.sample_set(start, end, density, rng) {
            Some(samples) => compute_transmittance(&samples),
            None => 1.0,
        }
    }

    /// The weighted samples `estimate` would combine, `None` for a
    /// zero-length segment.
    pub fn sample_set<D: DensityField + ?Sized>(&self,
                                                start: &Vector3f,
                                                end: &Vector3f,
                                                density: &D,
                                                rng: &mut UniformRandom) -> Option<SampleSet> {
        if start == end {
            return None;
        }
        Some(self.scheduler.draw(start, end, density, rng))
    }
}

impl Transmittance for PowerSeriesEstimator {
    fn transmittance(&self,
                     density: &dyn DensityField,
                     start: Vector3f,
                     end: Vector3f,
                     rng: &mut UniformRandom) -> Float {
        self.estimate(&start, &end, density, rng)
    }

    fn name(&self) -> &'static str {
        "power_series"
    }
}
