// Copyright @yucwang 2026

//! Unbiased `exp` of a mean from a randomly sized batch of samples.
//!
//! Every sample takes a turn as the pivot `p`. The remaining samples, shifted
//! by `-p`, are reduced to their power sums and then, through Newton's
//! identities, to their elementary symmetric polynomials `S[k]`. Each `S[k]`
//! is an unbiased estimate of the `(k + 1)`-th term of the Taylor series of
//! `exp(mu - p)` around the pivot once divided by the falling factorial
//! `N (N - 1) ... (N - k)` and by the inclusion probability of the sample that
//! made that term possible. The leave-one-out average over all pivots is the
//! transmittance estimate.
//!
//! Inputs and output are `f32`; sums run in `f64`. Cancellation between the
//! alternating terms still grows with the batch size, and NaN or infinities
//! are returned as they come.

use crate::estimators::roulette::SampleSet;
use crate::math::constants::Float;

/// Estimate contributed by `pivot`, with `others` the remaining `N` values
/// and `weights` the `N + 1` inclusion probabilities of the whole set.
pub fn pivot_estimate(pivot: f64, others: &[f64], weights: &[f64]) -> f64 {
    let n = others.len();
    debug_assert!(weights.len() > n);

    let shifted: Vec<f64> = others.iter().map(|y| y - pivot).collect();

    // power_sums[k] = sum_j shifted[j]^(k + 1)
    let mut power_sums = vec![0.0f64; n];
    let mut powers = shifted.clone();
    for k in 0..n {
        power_sums[k] = powers.iter().sum();
        for (power, y) in powers.iter_mut().zip(shifted.iter()) {
            *power *= y;
        }
    }

    let mut elementary = vec![0.0f64; n];
    for k in 0..n {
        let mut sum = 0.0;
        let mut sign = 1.0;
        for j in 0..k {
            sum += sign * elementary[k - 1 - j] * power_sums[j];
            sign = -sign;
        }
        sum += sign * power_sums[k];
        elementary[k] = sum / (k + 1) as f64;
    }

    let mut f = 1.0 / weights[0];
    let mut falling = 1.0;
    for k in 0..n {
        falling *= (n - k) as f64;
        f += elementary[k] / (falling * weights[k + 1]);
    }

    pivot.exp() * f
}

/// Leave-one-out average of [`pivot_estimate`] over every sample.
pub fn compute_transmittance(samples: &SampleSet) -> Float {
    let values: Vec<f64> = samples.iter().map(|s| s.x as f64).collect();
    let weights: Vec<f64> = samples.iter().map(|s| s.q as f64).collect();
    let count = values.len();

    let mut others = Vec::with_capacity(count.saturating_sub(1));
    let mut total = 0.0f64;
    for (i, &pivot) in values.iter().enumerate() {
        others.clear();
        others.extend(values.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, v)| *v));
        total += pivot_estimate(pivot, &others, &weights);
    }

    (total / count as f64) as Float
}
