// Copyright @yucwang 2026

use crate::core::emitter::{Emission, MediumQuery};
use crate::core::phase::PhaseFunction;
use crate::core::rng::UniformRandom;
use crate::core::settings::ShadowSettings;
use crate::emitters::directional::DirectionalLight;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::phases::henyey_greenstein::HenyeyGreenstein;

/// Single scattering of one directional light.
///
/// In-scattered radiance is `T_shadow * sigma_s * phase(cos) * irradiance`,
/// where `T_shadow` comes from marching toward the light with the same
/// transmittance estimator as the primary ray.
pub struct SingleScatterEmission {
    light: DirectionalLight,
    phase: HenyeyGreenstein,
    sigma_s: Float,
    shadow: ShadowSettings,
}

impl SingleScatterEmission {
    pub fn new(light: DirectionalLight,
               phase: HenyeyGreenstein,
               sigma_s: Float,
               shadow: ShadowSettings) -> Self {
        Self { light, phase, sigma_s, shadow }
    }

    /// Transmittance from `p_world` toward the light, in fixed steps.
    ///
    /// Steps whose start lies outside the medium bounds are skipped. The march
    /// stops after `max_distance`, `max_steps`, or once the transmittance
    /// drops to `min_transmittance`.
    pub fn shadow_transmittance(&self,
                                query: &MediumQuery,
                                p_world: Vector3f,
                                rng: &mut UniformRandom) -> Float {
        let dir = self.light.direction();
        let bounds = query.bounds();
        let mut t = 0.0;
        let mut beta = 1.0;

        for _ in 0..self.shadow.max_steps {
            if t >= self.shadow.max_distance || beta <= self.shadow.min_transmittance {
                break;
            }
            let start = p_world + dir * t;
            t += self.shadow.step_size;
            if let Some(bounds) = bounds {
                if !bounds.contains(&start) {
                    continue;
                }
            }
            let end = p_world + dir * t;
            beta *= query.transmittance(start, end, rng);
        }

        beta
    }
}

impl Emission for SingleScatterEmission {
    fn eval(&self,
            query: &MediumQuery,
            p_world: Vector3f,
            dir: Vector3f,
            rng: &mut UniformRandom) -> RGBSpectrum {
        let phase = self.phase.eval(self.light.cos_theta(&dir));
        let shadow = self.shadow_transmittance(query, p_world, rng);
        self.light.irradiance * (shadow * self.sigma_s * phase)
    }
}
