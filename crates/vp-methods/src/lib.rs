//! # vp-methods
//!
//! Numerical methods: the Cox-Ross-Rubinstein binomial lattice with
//! backward induction, and the Monte Carlo path simulation framework.
//!
//! # Modules
//!
//! * [`lattice`]: binomial tree, backward induction, inspectable grids
//! * [`monte_carlo`]: GBM path generation, path pricing, MC orchestrator

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial tree and backward induction.
pub mod lattice;

/// Monte Carlo simulation: path generation, pricing, statistics.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{backward_induction, BinomialTree, Lattice};
pub use monte_carlo::{
    EuropeanPathPricer, GbmPathGenerator, MonteCarloModel, PathBatch, PathPricer,
    SimulationOutcome,
};
