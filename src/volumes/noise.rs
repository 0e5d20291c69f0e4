// Copyright @yucwang 2026

//! Seeded 3D gradient noise and its fractal sum.

use crate::math::constants::{Float, Vector3f};

/// Doubled permutation of `0..256`, shuffled from a seed.
#[derive(Clone)]
struct PermutationTable {
    perm: [u8; 512],
}

impl PermutationTable {
    fn new(seed: u64) -> Self {
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().take(256).enumerate() {
            *slot = i as u8;
        }

        // xorshift64 must not start from zero
        let mut state = if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed };
        for i in (1..256).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = (state % (i as u64 + 1)) as usize;
            perm.swap(i, j);
        }

        for i in 0..256 {
            perm[256 + i] = perm[i];
        }
        Self { perm }
    }

    #[inline]
    fn get(&self, index: usize) -> usize {
        self.perm[index & 511] as usize
    }
}

fn fade(t: Float) -> Float {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: Float, a: Float, b: Float) -> Float {
    a + t * (b - a)
}

fn grad(hash: usize, x: Float, y: Float, z: Float) -> Float {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// Improved Perlin noise, values in roughly `[-1, 1]`, zero on the lattice.
#[derive(Clone)]
pub struct GradientNoise {
    table: PermutationTable,
}

impl GradientNoise {
    pub fn new(seed: u64) -> Self {
        Self { table: PermutationTable::new(seed) }
    }

    pub fn sample(&self, p: &Vector3f) -> Float {
        let (fx, fy, fz) = (p.x.floor(), p.y.floor(), p.z.floor());
        let (x, y, z) = (p.x - fx, p.y - fy, p.z - fz);
        let xi = (fx as i32 & 255) as usize;
        let yi = (fy as i32 & 255) as usize;
        let zi = (fz as i32 & 255) as usize;
        let (u, v, w) = (fade(x), fade(y), fade(z));

        let t = &self.table;
        let a = t.get(xi) + yi;
        let aa = t.get(a) + zi;
        let ab = t.get(a + 1) + zi;
        let b = t.get(xi + 1) + yi;
        let ba = t.get(b) + zi;
        let bb = t.get(b + 1) + zi;

        lerp(w,
             lerp(v,
                  lerp(u, grad(t.get(aa), x, y, z), grad(t.get(ba), x - 1.0, y, z)),
                  lerp(u, grad(t.get(ab), x, y - 1.0, z), grad(t.get(bb), x - 1.0, y - 1.0, z))),
             lerp(v,
                  lerp(u, grad(t.get(aa + 1), x, y, z - 1.0), grad(t.get(ba + 1), x - 1.0, y, z - 1.0)),
                  lerp(u, grad(t.get(ab + 1), x, y - 1.0, z - 1.0),
                       grad(t.get(bb + 1), x - 1.0, y - 1.0, z - 1.0))))
    }

    /// Fractal Brownian motion: `octaves` layers, each at twice the frequency
    /// and half the amplitude of the previous, normalized back to `[-1, 1]`.
    pub fn fbm(&self, p: &Vector3f, octaves: u32, frequency: Float) -> Float {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut max_amplitude = 0.0;
        let mut freq = frequency;
        for _ in 0..octaves {
            total += self.sample(&(p * freq)) * amplitude;
            max_amplitude += amplitude;
            amplitude *= 0.5;
            freq *= 2.0;
        }
        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }
}
