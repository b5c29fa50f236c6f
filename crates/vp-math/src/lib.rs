//! # vp-math
//!
//! Mathematical utilities: the standard normal distribution (via statrs),
//! a matrix newtype over nalgebra, standard-normal random sources, a
//! statistics accumulator, and Newton-Raphson root finding.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Dense real matrices.
pub mod matrix;

/// Random number generators.
pub mod random_numbers;

/// 1D root-finding solvers.
pub mod solvers1d;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use matrix::Matrix;
pub use random_numbers::{MersenneTwisterNormalSource, RandomSource, ZigguratNormalSource};
pub use solvers1d::{newton_raphson, NewtonOptions};
pub use statistics::Statistics;
