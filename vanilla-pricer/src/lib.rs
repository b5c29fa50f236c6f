//! # vanilla-pricer
//!
//! Valuation of plain vanilla options by three methods: the
//! Black-Scholes-Merton closed form, a Cox-Ross-Rubinstein binomial
//! lattice, and Monte Carlo simulation of geometric Brownian motion. Also
//! provides the analytic Greeks, implied volatility from an observed price,
//! and intrinsic-payoff sweeps.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates and adds one-call entry points. Application
//! code should depend on this crate rather than the individual `vp-*`
//! crates.
//!
//! ## Quick start
//!
//! ```rust
//! use vanilla_pricer::{price, greeks, Contract, OptionType, PricingMethod};
//!
//! let call = Contract::builder(OptionType::Call, 100.0, 100.0, 0.05, 1.0)
//!     .volatility(0.2)
//!     .build()?;
//!
//! let value = price(&call, &PricingMethod::Analytic)?.price();
//! assert!((value - 10.4506).abs() < 1e-4);
//! assert!((greeks(&call)?.delta - 0.6368).abs() < 1e-4);
//! # Ok::<(), vanilla_pricer::core::Error>(())
//! ```
//!
//! Every operation reports failures through [`core::Error`]; nothing is
//! clamped or replaced by a default value.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use vp_core as core;

/// Mathematical utilities: normal distribution, matrices, RNG, solvers.
pub use vp_math as math;

/// Contracts, payoffs, and exercise styles.
pub use vp_instruments as instruments;

/// Numerical methods (binomial lattice, Monte Carlo).
pub use vp_methods as methods;

/// Pricing engines, Greeks, and the implied-volatility solver.
pub use vp_pricingengines as pricingengines;

pub use vp_core::{Error, Real, Result, Volatility};
pub use vp_instruments::{Contract, ContractBuilder, ExerciseStyle, OptionType, PricingEngine};
pub use vp_pricingengines::{
    AnalyticEuropeanEngine, BinomialEngine, Greek, Greeks, ImpliedVolSettings,
    ImpliedVolatilitySolver, LatticeResult, LatticeSettings, MonteCarloEngine, SimulationResult,
    SimulationSettings,
};

/// Step of a payoff sweep when none is given.
pub const DEFAULT_PAYOFF_STEP: Real = 1.0;

/// Which method to value a contract with.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PricingMethod {
    /// Black-Scholes-Merton closed form (European, no dividends).
    #[default]
    Analytic,
    /// Cox-Ross-Rubinstein binomial lattice (European or American).
    Lattice(LatticeSettings),
    /// Monte Carlo simulation (European, no dividends).
    Simulation(SimulationSettings),
}

/// The outcome of [`price`], shaped by the method used.
#[derive(Debug, Clone, PartialEq)]
pub enum Valuation {
    /// Closed-form price.
    Analytic(Real),
    /// Lattice price and, on request, the grids.
    Lattice(LatticeResult),
    /// Simulated price, its standard error and, on request, the paths.
    Simulation(SimulationResult),
}

impl Valuation {
    /// The present value, whichever method produced it.
    pub fn price(&self) -> Real {
        match self {
            Valuation::Analytic(p) => *p,
            Valuation::Lattice(r) => r.price,
            Valuation::Simulation(r) => r.price,
        }
    }
}

/// Value `contract` with `method`.
pub fn price(contract: &Contract, method: &PricingMethod) -> Result<Valuation> {
    match method {
        PricingMethod::Analytic => AnalyticEuropeanEngine::new()
            .calculate(contract)
            .map(Valuation::Analytic),
        PricingMethod::Lattice(settings) => BinomialEngine::new(*settings)
            .calculate(contract)
            .map(Valuation::Lattice),
        PricingMethod::Simulation(settings) => MonteCarloEngine::with_settings(*settings)
            .calculate(contract)
            .map(Valuation::Simulation),
    }
}

/// Analytic Greeks of `contract`.
pub fn greeks(contract: &Contract) -> Result<Greeks> {
    AnalyticEuropeanEngine::new().greeks(contract)
}

/// One Greek by name.
///
/// Errors from the valuation itself propagate; an unrecognised `name`
/// yields `Ok(None)`.
pub fn greek(contract: &Contract, name: &str) -> Result<Option<Real>> {
    Ok(greeks(contract)?.get(name))
}

/// Implied volatility at the contract's own observed price.
pub fn implied_volatility(contract: &Contract) -> Result<Volatility> {
    ImpliedVolatilitySolver::default().solve_observed(contract)
}

/// Implied volatility at `observed_price`.
pub fn implied_volatility_for(contract: &Contract, observed_price: Real) -> Result<Volatility> {
    ImpliedVolatilitySolver::default().solve(contract, observed_price)
}

/// Intrinsic payoff at `range_start, range_start + size, …` strictly below
/// `range_stop`.
///
/// `strike_override` replaces the contract strike for the sweep only;
/// `size` defaults to [`DEFAULT_PAYOFF_STEP`].
pub fn payoff(
    contract: &Contract,
    range_start: Real,
    range_stop: Real,
    strike_override: Option<Real>,
    size: Option<Real>,
) -> Result<Vec<Real>> {
    contract.payoff_profile(
        range_start,
        range_stop,
        strike_override,
        size.unwrap_or(DEFAULT_PAYOFF_STEP),
    )
}
