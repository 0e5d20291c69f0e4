// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("roulette constant {roulette} gives continuation probability {probability} > 1 for {baseline_samples} baseline samples")]
    RouletteProbability { roulette: Float, baseline_samples: usize, probability: Float },
    #[error("roulette constant must be finite and non-negative, got {0}")]
    NegativeRoulette(Float),
    #[error("{name} must be at least 1")]
    ZeroCount { name: &'static str },
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: Float },
    #[error("{name} must lie in [0, 1), got {value}")]
    CutoffOutOfRange { name: &'static str, value: Float },
    #[error("march range is empty: t_min {t_min} >= t_max {t_max}")]
    EmptyRange { t_min: Float, t_max: Float },
}

/// Parameters of the unbiased transmittance estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorSettings {
    /// Mandatory samples per segment, `K + 1`.
    pub baseline_samples: usize,
    /// Roulette constant `c`.
    pub roulette: Float,
    /// Comb quadrature resolution `M`.
    pub comb_samples: usize,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self { baseline_samples: 3, roulette: 2.5, comb_samples: 12 }
    }
}

impl EstimatorSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baseline_samples == 0 {
            return Err(ConfigError::ZeroCount { name: "baseline_samples" });
        }
        if self.comb_samples == 0 {
            return Err(ConfigError::ZeroCount { name: "comb_samples" });
        }
        if !self.roulette.is_finite() || self.roulette < 0.0 {
            return Err(ConfigError::NegativeRoulette(self.roulette));
        }
        // The first continuation probability is the largest one.
        let probability = self.roulette / self.baseline_samples as Float;
        if probability > 1.0 {
            return Err(ConfigError::RouletteProbability {
                roulette: self.roulette,
                baseline_samples: self.baseline_samples,
                probability,
            });
        }
        Ok(())
    }
}

/// Fixed-step march along a primary ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchSettings {
    pub step_size: Float,
    pub t_min: Float,
    pub t_max: Float,
    pub min_transmittance: Float,
    pub max_steps: usize,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self { step_size: 0.02, t_min: 0.0, t_max: 5.0, min_transmittance: 0.001, max_steps: 512 }
    }
}

impl MarchSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("march.step_size", self.step_size)?;
        check_cutoff("march.min_transmittance", self.min_transmittance)?;
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroCount { name: "march.max_steps" });
        }
        if !(self.t_min < self.t_max) {
            return Err(ConfigError::EmptyRange { t_min: self.t_min, t_max: self.t_max });
        }
        Ok(())
    }
}

/// March from a shading point toward the light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowSettings {
    pub step_size: Float,
    pub max_distance: Float,
    pub max_steps: usize,
    pub min_transmittance: Float,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self { step_size: 0.02, max_distance: 3.0, max_steps: 100, min_transmittance: 0.01 }
    }
}

impl ShadowSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("shadow.step_size", self.step_size)?;
        check_positive("shadow.max_distance", self.max_distance)?;
        check_cutoff("shadow.min_transmittance", self.min_transmittance)?;
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroCount { name: "shadow.max_steps" });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmSettings {
    pub width: usize,
    pub height: usize,
    pub samples_per_pixel: u32,
    pub background: RGBSpectrum,
    pub camera_origin: Vector3f,
}

impl Default for FilmSettings {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            samples_per_pixel: 1,
            background: RGBSpectrum::new(0.5, 0.7, 1.0),
            camera_origin: Vector3f::new(0.0, 0.0, -3.0),
        }
    }
}

impl FilmSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroCount { name: "film.width" });
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroCount { name: "film.height" });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroCount { name: "film.samples_per_pixel" });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediumKind {
    /// Constant density inside a sphere around the origin.
    ConstantSphere { density: Float, radius: Float },
    /// `1 - |p| / radius` inside the sphere.
    FalloffSphere { radius: Float },
    /// `scale * exp(-|p|)`, unbounded.
    Exponential { scale: Float },
    /// Fractal noise cloud fading out toward the sphere boundary.
    NoiseCloud { radius: Float, seed: u64, octaves: u32, frequency: Float },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmissionKind {
    Constant { radiance: RGBSpectrum, radius: Float },
    SingleScatter { direction: Vector3f, irradiance: RGBSpectrum, g: Float, sigma_s: Float },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmittanceMethod {
    PowerSeries,
    Quadrature,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub seed: u64,
    pub estimator: EstimatorSettings,
    pub transmittance: TransmittanceMethod,
    pub march: MarchSettings,
    pub shadow: ShadowSettings,
    pub film: FilmSettings,
    pub medium: MediumKind,
    pub emission: EmissionKind,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::cloud()
    }
}

impl RenderSettings {
    /// Noise cloud lit by a single directional light.
    pub fn cloud() -> Self {
        Self {
            seed: 42,
            estimator: EstimatorSettings::default(),
            transmittance: TransmittanceMethod::PowerSeries,
            march: MarchSettings::default(),
            shadow: ShadowSettings::default(),
            film: FilmSettings::default(),
            medium: MediumKind::NoiseCloud { radius: 2.0, seed: 1337, octaves: 5, frequency: 0.5 },
            emission: EmissionKind::SingleScatter {
                direction: Vector3f::new(0.0, 0.0, -1.0),
                irradiance: RGBSpectrum::new(20.0, 8.0, 7.0) * 3.5,
                g: 0.2,
                sigma_s: 1.0,
            },
        }
    }

    /// Homogeneous self-emitting sphere.
    pub fn homogeneous() -> Self {
        Self {
            march: MarchSettings { t_max: 10.0, min_transmittance: 0.01, ..MarchSettings::default() },
            film: FilmSettings { width: 400, height: 400, ..FilmSettings::default() },
            medium: MediumKind::ConstantSphere { density: 0.8, radius: 2.0 },
            emission: EmissionKind::Constant { radiance: RGBSpectrum::new(1.0, 0.5, 0.35), radius: 2.0 },
            ..Self::cloud()
        }
    }

    /// Rejects every configuration that could only fail mid-render.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.estimator.validate()?;
        self.march.validate()?;
        self.film.validate()?;
        if let EmissionKind::SingleScatter { .. } = self.emission {
            self.shadow.validate()?;
        }
        match self.medium {
            MediumKind::ConstantSphere { density, radius } => {
                check_non_negative("medium.density", density)?;
                check_positive("medium.radius", radius)
            }
            MediumKind::FalloffSphere { radius } => check_positive("medium.radius", radius),
            MediumKind::Exponential { scale } => check_non_negative("medium.scale", scale),
            MediumKind::NoiseCloud { radius, octaves, frequency, .. } => {
                if octaves == 0 {
                    return Err(ConfigError::ZeroCount { name: "medium.octaves" });
                }
                check_positive("medium.frequency", frequency)?;
                check_positive("medium.radius", radius)
            }
        }
    }
}

fn check_positive(name: &'static str, value: Float) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn check_non_negative(name: &'static str, value: Float) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn check_cutoff(name: &'static str, value: Float) -> Result<(), ConfigError> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::CutoffOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert_eq!(RenderSettings::cloud().validate(), Ok(()));
        assert_eq!(RenderSettings::homogeneous().validate(), Ok(()));
        assert_eq!(RenderSettings::default(), RenderSettings::cloud());
    }

    #[test]
    fn roulette_above_one_is_rejected() {
        let settings = EstimatorSettings { baseline_samples: 3, roulette: 3.5, comb_samples: 12 };
        match settings.validate() {
            Err(ConfigError::RouletteProbability { probability, .. }) => assert!(probability > 1.0),
            other => panic!("unexpected result {:?}", other),
        }

        let boundary = EstimatorSettings { baseline_samples: 3, roulette: 3.0, comb_samples: 12 };
        assert_eq!(boundary.validate(), Ok(()));

        let negative = EstimatorSettings { roulette: -1.0, ..EstimatorSettings::default() };
        assert_eq!(negative.validate(), Err(ConfigError::NegativeRoulette(-1.0)));
    }

    #[test]
    fn zero_counts_are_rejected() {
        let settings = EstimatorSettings { comb_samples: 0, ..EstimatorSettings::default() };
        assert_eq!(settings.validate(), Err(ConfigError::ZeroCount { name: "comb_samples" }));

        let settings = EstimatorSettings { baseline_samples: 0, ..EstimatorSettings::default() };
        assert_eq!(settings.validate(), Err(ConfigError::ZeroCount { name: "baseline_samples" }));
    }

    #[test]
    fn bad_step_size_is_rejected_before_rendering() {
        let mut settings = RenderSettings::cloud();
        settings.march.step_size = 0.0;
        assert_eq!(
            settings.validate(),
            Err(ConfigError::NonPositive { name: "march.step_size", value: 0.0 })
        );

        settings.march.step_size = -0.02;
        assert!(settings.validate().is_err());

        let mut settings = RenderSettings::cloud();
        settings.shadow.step_size = Float::NAN;
        assert!(settings.validate().is_err());

        // Shadow settings only matter for the single-scatter model.
        let mut settings = RenderSettings::homogeneous();
        settings.shadow.step_size = 0.0;
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn march_range_and_cutoff_are_checked() {
        let mut settings = RenderSettings::cloud();
        settings.march.t_max = settings.march.t_min;
        assert!(matches!(settings.validate(), Err(ConfigError::EmptyRange { .. })));

        let mut settings = RenderSettings::cloud();
        settings.march.min_transmittance = 1.0;
        assert!(matches!(settings.validate(), Err(ConfigError::CutoffOutOfRange { .. })));
    }
}
