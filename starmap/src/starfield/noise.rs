//! Smooth value noise for nebula clouds and the milky-way band

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Lattice of random values in [0, 1], sampled with smoothstep interpolation.
///
/// Sample coordinates are normalized: `(0, 0)` and `(1, 1)` are opposite
/// corners of the lattice, and values outside that range are clamped.
#[derive(Debug, Clone)]
pub struct ValueNoise {
    cells: usize,
    values: Vec<f64>,
}

impl ValueNoise {
    /// Create a `cells`x`cells` lattice (at least 2x2) from the random source
    pub fn new(cells: usize, rng: &mut impl Rng) -> Self {
        let cells = cells.max(2);
        let values = (0..cells * cells).map(|_| rng.random::<f64>()).collect();
        Self { cells, values }
    }

    fn at(&self, ix: usize, iy: usize) -> f64 {
        self.values[iy * self.cells + ix]
    }

    /// Interpolated noise value in [0, 1]
    pub fn sample(&self, u: f64, v: f64) -> f64 {
        let max = (self.cells - 1) as f64;
        let x = (u.clamp(0.0, 1.0)) * max;
        let y = (v.clamp(0.0, 1.0)) * max;

        let x0 = (x.floor() as usize).min(self.cells - 2);
        let y0 = (y.floor() as usize).min(self.cells - 2);
        let tx = smoothstep(x - x0 as f64);
        let ty = smoothstep(y - y0 as f64);

        let top = lerp(self.at(x0, y0), self.at(x0 + 1, y0), tx);
        let bottom = lerp(self.at(x0, y0 + 1), self.at(x0 + 1, y0 + 1), tx);
        lerp(top, bottom, ty)
    }
}

fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Zero-mean Gaussian sample; a non-finite or negative sigma gives 0
pub fn gaussian(rng: &mut impl Rng, sigma: f64) -> f64 {
    match Normal::new(0.0, sigma) {
        Ok(normal) => normal.sample(rng),
        Err(_) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_noise_stays_in_unit_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let noise = ValueNoise::new(6, &mut rng);
        for i in 0..=40 {
            for j in 0..=40 {
                let value = noise.sample(i as f64 / 40.0, j as f64 / 40.0);
                assert!((0.0..=1.0).contains(&value));
            }
        }
        // Out-of-range coordinates clamp to the edges
        assert_eq!(noise.sample(-3.0, 0.5), noise.sample(0.0, 0.5));
    }

    #[test]
    fn test_noise_hits_lattice_values_at_corners() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let noise = ValueNoise::new(3, &mut rng);
        assert_eq!(noise.sample(0.0, 0.0), noise.values[0]);
        assert_eq!(noise.sample(1.0, 1.0), noise.values[8]);
    }

    #[test]
    fn test_gaussian_rejects_bad_sigma() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(gaussian(&mut rng, f64::NAN), 0.0);
        assert!(gaussian(&mut rng, 1.0).is_finite());
    }
}
