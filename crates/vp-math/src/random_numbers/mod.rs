//! Random number generators.
//!
//! The pricing engines only ever ask for a block of independent
//! standard-normal variates through [`RandomSource`]. The seed travels with
//! each request, so no generator state outlives a call and results never
//! depend on process-wide state.
//!
//! Two sources are provided:
//!
//! * [`ZigguratNormalSource`]: `rand::rngs::StdRng` sampled through
//!   `rand_distr::StandardNormal` (the default).
//! * [`MersenneTwisterNormalSource`]: MT19937-64 uniforms mapped through the
//!   inverse normal CDF.

use crate::distributions::normal_cdf_inverse;
use crate::matrix::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_mt::Mt19937GenRand64;
use vp_core::Real;

/// A supplier of independent standard-normal draws.
pub trait RandomSource: std::fmt::Debug + Send + Sync {
    /// A `rows × cols` matrix of i.i.d. N(0, 1) variates.
    ///
    /// The same `Some(seed)` must always produce the same matrix. With
    /// `None` the generator is seeded from fresh entropy for this call only.
    fn normal(&self, rows: usize, cols: usize, seed: Option<u64>) -> Matrix;
}

// ─── Ziggurat (rand / rand_distr) ────────────────────────────────────────────

/// Standard-normal source backed by `StdRng` and the Ziggurat sampler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZigguratNormalSource;

impl RandomSource for ZigguratNormalSource {
    fn normal(&self, rows: usize, cols: usize, seed: Option<u64>) -> Matrix {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        // Row-major fill keeps a path's draws contiguous in the stream.
        let data: Vec<Real> = (0..rows * cols)
            .map(|_| rng.sample::<Real, _>(StandardNormal))
            .collect();
        Matrix::from_row_slice(rows, cols, &data)
    }
}

// ─── Mersenne Twister + inverse CDF ──────────────────────────────────────────

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // top 53 bits → exactly representable in [0, 1)
        (self.rng.next_u64() >> 11) as Real / (1u64 << 53) as Real
    }
}

/// An inverse-cumulative normal random number generator.
///
/// Wraps a uniform RNG and transforms its output through the inverse CDF of
/// the standard normal distribution.
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator backed by a Mersenne Twister with the given
    /// seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }

    /// Generate the next standard-normal deviate.
    pub fn next_real(&mut self) -> Real {
        // Avoid exact 0 which would produce −∞
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        normal_cdf_inverse(u)
    }
}

/// Standard-normal source backed by [`InverseCumulativeNormalRng`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MersenneTwisterNormalSource;

impl RandomSource for MersenneTwisterNormalSource {
    fn normal(&self, rows: usize, cols: usize, seed: Option<u64>) -> Matrix {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = InverseCumulativeNormalRng::new(seed);
        let data: Vec<Real> = (0..rows * cols).map(|_| rng.next_real()).collect();
        Matrix::from_row_slice(rows, cols, &data)
    }
}
