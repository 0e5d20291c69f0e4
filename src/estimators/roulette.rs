// Copyright @yucwang 2026

use crate::core::rng::UniformRandom;
use crate::core::volume::DensityField;
use crate::estimators::comb::comb_estimate;
use crate::math::constants::{Float, Vector3f};

/// One comb estimate `x` of the negative optical depth, drawn under the
/// cumulative inclusion probability `q`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: Float,
    pub q: Float,
}

/// Weighted samples of a single segment, in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { samples: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, x: Float, q: Float) {
        self.samples.push(Sample { x, q });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}

impl From<Vec<Sample>> for SampleSet {
    fn from(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
}

/// Draws `K + 1` mandatory comb samples, then keeps drawing while a roulette
/// test with continuation probability `c / (K + i)` survives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouletteScheduler {
    baseline: usize,
    roulette: Float,
    comb_samples: usize,
}

impl RouletteScheduler {
    /// `baseline_samples` is `K + 1`. The caller guarantees `roulette / (K + 1) <= 1`.
    pub fn new(baseline_samples: usize, roulette: Float, comb_samples: usize) -> Self {
        Self {
            baseline: baseline_samples.saturating_sub(1),
            roulette,
            comb_samples,
        }
    }

    pub fn baseline_samples(&self) -> usize {
        self.baseline + 1
    }

    pub fn roulette(&self) -> Float {
        self.roulette
    }

    pub fn comb_samples(&self) -> usize {
        self.comb_samples
    }

    /// Continuation probability before the `i`-th extra sample, `i >= 1`.
    pub fn continuation_probability(&self, i: usize) -> Float {
        self.roulette / (self.baseline + i) as Float
    }

    pub fn draw<D: DensityField + ?Sized>(&self,
                                          start: &Vector3f,
                                          end: &Vector3f,
                                          density: &D,
                                          rng: &mut UniformRandom) -> SampleSet {
        let mut samples = SampleSet::with_capacity(self.baseline + 4);
        for _ in 0..=self.baseline {
            samples.push(comb_estimate(start, end, self.comb_samples, density, rng), 1.0);
        }

        let mut q = 1.0;
        let mut i = 1;
        loop {
            let prob = self.continuation_probability(i);
            if rng.next_f32() >= prob {
                break;
            }
            q *= prob;
            samples.push(comb_estimate(start, end, self.comb_samples, density, rng), q);
            i += 1;
        }

        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_segment() -> (Vector3f, Vector3f) {
        (Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn baseline_samples_have_unit_weight() {
        let scheduler = RouletteScheduler::new(3, 2.5, 12);
        let (start, end) = unit_segment();
        let density = |p: Vector3f| 0.5 + p.z;
        for seed in 0..200 {
            let mut rng = UniformRandom::new(seed, 0.0, 1.0);
            let samples = scheduler.draw(&start, &end, &density, &mut rng);
            assert!(samples.len() >= 3);
            for sample in samples.iter().take(3) {
                assert_eq!(sample.q, 1.0);
            }
        }
    }

    #[test]
    fn extra_weights_are_products_of_continuation_probabilities() {
        let scheduler = RouletteScheduler::new(3, 2.5, 12);
        let (start, end) = unit_segment();
        let density = |p: Vector3f| 0.5 + p.z;

        let mut longest = SampleSet::default();
        for seed in 0..500 {
            let mut rng = UniformRandom::new(seed, 0.0, 1.0);
            let samples = scheduler.draw(&start, &end, &density, &mut rng);
            if samples.len() > longest.len() {
                longest = samples;
            }
        }
        assert!(longest.len() > 4, "roulette never extended past one extra sample");

        let mut expected = 1.0;
        for (i, sample) in longest.iter().skip(3).enumerate() {
            expected *= scheduler.continuation_probability(i + 1);
            assert!((sample.q - expected).abs() <= 1e-6 * expected);
            assert!(sample.q > 0.0);
        }
        let weights: Vec<Float> = longest.iter().map(|s| s.q).collect();
        for pair in weights[2..].windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn zero_roulette_keeps_only_the_baseline() {
        let scheduler = RouletteScheduler::new(3, 0.0, 12);
        let (start, end) = unit_segment();
        let density = |p: Vector3f| p.z;
        for seed in 0..100 {
            let mut rng = UniformRandom::new(seed, 0.0, 1.0);
            let samples = scheduler.draw(&start, &end, &density, &mut rng);
            assert_eq!(samples.len(), 3);
            assert!(samples.iter().all(|s| s.q == 1.0));
        }
    }

    #[test]
    fn draws_are_reproducible() {
        let scheduler = RouletteScheduler::new(3, 2.5, 12);
        let (start, end) = unit_segment();
        let density = |p: Vector3f| 1.0 + p.z * p.z;
        let mut a = UniformRandom::new(77, 0.0, 1.0);
        let mut b = UniformRandom::new(77, 0.0, 1.0);
        for _ in 0..20 {
            assert_eq!(scheduler.draw(&start, &end, &density, &mut a),
                       scheduler.draw(&start, &end, &density, &mut b));
        }
    }

    #[test]
    fn mean_extra_count_matches_roulette_survival() {
        // With K = 2 and c = 2.5 the chance of at least one extra sample is 2.5 / 3.
        let scheduler = RouletteScheduler::new(3, 2.5, 4);
        let (start, end) = unit_segment();
        let density = |_p: Vector3f| -> Float { 1.0 };
        let trials = 20_000;
        let mut extended = 0;
        for seed in 0..trials {
            let mut rng = UniformRandom::for_stream(1, seed);
            if scheduler.draw(&start, &end, &density, &mut rng).len() > 3 {
                extended += 1;
            }
        }
        let rate = extended as f64 / trials as f64;
        assert!((rate - 2.5 / 3.0).abs() < 0.02, "rate = {}", rate);
    }
}
