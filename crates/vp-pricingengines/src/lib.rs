//! # vp-pricingengines
//!
//! Pricing engines for vanilla options, plus sensitivities and implied
//! volatility.
//!
//! ## Engines
//!
//! - [`AnalyticEuropeanEngine`]: Black-Scholes-Merton closed form and [`Greeks`]
//! - [`BinomialEngine`]: Cox-Ross-Rubinstein lattice, European and American
//! - [`MonteCarloEngine`]: GBM path simulation with optional antithetic draws
//! - [`ImpliedVolatilitySolver`]: Newton-Raphson on the analytic price

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_engine;
pub mod greeks;
pub mod implied_volatility;
pub mod monte_carlo_engine;

pub use analytic_european_engine::{
    black_scholes_greeks, black_scholes_price, black_scholes_vega, AnalyticEuropeanEngine,
};
pub use binomial_engine::{BinomialEngine, LatticeResult, LatticeSettings};
pub use greeks::{Greek, Greeks};
pub use implied_volatility::{ImpliedVolSettings, ImpliedVolatilitySolver, MIN_VEGA};
pub use monte_carlo_engine::{MonteCarloEngine, SimulationResult, SimulationSettings};
