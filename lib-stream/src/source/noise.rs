use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;
use math::Vector;

/// Gaussian noise with support for deterministic seeding.
///
#[derive(Clone)]
pub struct NoiseGenerator {
    rng: StdRng,
}

impl NoiseGenerator {
    /// If seed is 0 the generator is seeded from entropy, otherwise the sequence of values is
    /// reproducible.
    ///
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(seed)
        };
        Self { rng }
    }

    /// Generate Gaussian noise with given standard deviation
    #[inline]
    pub fn gaussian(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        let n: f32 = self.rng.sample(StandardNormal);
        n * stddev
    }

    /// A vector with three independent Gaussian components.
    #[inline]
    pub fn gaussian_vector(&mut self, stddev: f32) -> Vector {
        Vector::new(self.gaussian(stddev), self.gaussian(stddev), self.gaussian(stddev))
    }
}
