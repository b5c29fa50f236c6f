//! Probability distributions.
//!
//! Only the standard normal is needed by the pricing engines; it delegates
//! to the `statrs` error functions.

pub mod normal;

pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf};
