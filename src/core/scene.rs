// Copyright @yucwang 2026

use crate::core::emitter::Emission;
use crate::core::settings::{EmissionKind, MediumKind, RenderSettings};
use crate::core::volume::DensityField;
use crate::emitters::constant::ConstantEmission;
use crate::emitters::directional::DirectionalLight;
use crate::emitters::single_scatter::SingleScatterEmission;
use crate::math::spectrum::RGBSpectrum;
use crate::phases::henyey_greenstein::HenyeyGreenstein;
use crate::volumes::constant_sphere::ConstantSphereVolume;
use crate::volumes::exponential::ExponentialVolume;
use crate::volumes::falloff_sphere::FalloffSphereVolume;
use crate::volumes::noise_cloud::NoiseCloudVolume;
use std::sync::Arc;

/// A participating medium, the radiance it emits, and the color seen where
/// it is transparent.
pub struct Scene {
    density: Arc<dyn DensityField>,
    emission: Arc<dyn Emission>,
    background: RGBSpectrum,
}

impl Scene {
    pub fn new(density: Arc<dyn DensityField>, emission: Arc<dyn Emission>) -> Self {
        Self {
            density,
            emission,
            background: RGBSpectrum::default(),
        }
    }

    pub fn with_background(mut self, background: RGBSpectrum) -> Self {
        self.background = background;
        self
    }

    pub fn from_settings(settings: &RenderSettings) -> Self {
        log::debug!("Building scene: medium {:?}, emission {:?}.", settings.medium, settings.emission);

        let density: Arc<dyn DensityField> = match settings.medium {
            MediumKind::ConstantSphere { density, radius } => Arc::new(ConstantSphereVolume::new(density, radius)),
            MediumKind::FalloffSphere { radius } => Arc::new(FalloffSphereVolume::new(radius)),
            MediumKind::Exponential { scale } => Arc::new(ExponentialVolume::new(scale)),
            MediumKind::NoiseCloud { radius, seed, octaves, frequency } => {
                Arc::new(NoiseCloudVolume::new(seed, radius, octaves, frequency))
            }
        };

        let emission: Arc<dyn Emission> = match settings.emission {
            EmissionKind::Constant { radiance, radius } => Arc::new(ConstantEmission::new(radiance, radius)),
            EmissionKind::SingleScatter { direction, irradiance, g, sigma_s } => {
                Arc::new(SingleScatterEmission::new(DirectionalLight::new_with(direction, irradiance),
                                                    HenyeyGreenstein::new(g),
                                                    sigma_s,
                                                    settings.shadow))
            }
        };

        Scene::new(density, emission).with_background(settings.film.background)
    }

    pub fn density(&self) -> &dyn DensityField {
        self.density.as_ref()
    }

    pub fn emission(&self) -> &dyn Emission {
        self.emission.as_ref()
    }

    pub fn background(&self) -> RGBSpectrum {
        self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::bounds::BoundingSphere;
    use crate::math::constants::Vector3f;

    #[test]
    fn homogeneous_preset_builds_constant_sphere() {
        let scene = Scene::from_settings(&RenderSettings::homogeneous());
        assert_eq!(scene.density().density(Vector3f::zeros()), 0.8);
        assert_eq!(scene.density().bounds(), Some(BoundingSphere::centered(2.0)));
        assert_eq!(scene.background(), RGBSpectrum::new(0.5, 0.7, 1.0));
    }

    #[test]
    fn cloud_preset_is_bounded() {
        let scene = Scene::from_settings(&RenderSettings::cloud());
        assert_eq!(scene.density().bounds(), Some(BoundingSphere::centered(2.0)));
        assert_eq!(scene.density().density(Vector3f::new(0.0, 0.0, 3.0)), 0.0);
    }
}
