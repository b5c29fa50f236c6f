//! Implied volatility by Newton-Raphson on the Black-Scholes-Merton price.

use crate::analytic_european_engine::{
    black_scholes_price, black_scholes_vega, ensure_european_no_dividend,
};
use tracing::{debug, trace, warn};
use vp_core::{
    errors::{Error, Result},
    Price, Real, Volatility,
};
use vp_instruments::Contract;
use vp_math::{newton_raphson, NewtonOptions};

/// Vega (per unit volatility) below which a Newton step is not attempted.
pub const MIN_VEGA: Real = 1.0e-8;

/// Knobs for [`ImpliedVolatilitySolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedVolSettings {
    /// Iteration budget.
    pub max_iterations: usize,
    /// Stop once `|price(σ) − observed| < tolerance`.
    pub tolerance: Real,
    /// Starting volatility.
    pub initial_guess: Volatility,
}

impl Default for ImpliedVolSettings {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1.0e-10,
            initial_guess: 0.5,
        }
    }
}

impl ImpliedVolSettings {
    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the price tolerance.
    pub fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the starting volatility.
    pub fn with_initial_guess(mut self, initial_guess: Volatility) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::InvalidArgument("max_iterations must be at least 1".into()));
        }
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(self.initial_guess > 0.0 && self.initial_guess.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "initial guess must be a positive volatility, got {}",
                self.initial_guess
            )));
        }
        Ok(())
    }
}

/// Solves `BSM(σ) = observed` for σ.
///
/// The iterate lives only inside the solver; the contract is never modified.
/// Callers that want to keep the result can use
/// [`Contract::with_volatility`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpliedVolatilitySolver {
    settings: ImpliedVolSettings,
}

impl ImpliedVolatilitySolver {
    /// Create a solver with the given settings.
    pub fn new(settings: ImpliedVolSettings) -> Self {
        Self { settings }
    }

    /// The solver's settings.
    pub fn settings(&self) -> &ImpliedVolSettings {
        &self.settings
    }

    /// Implied volatility of `contract` at its own observed price.
    pub fn solve_observed(&self, contract: &Contract) -> Result<Volatility> {
        self.solve(contract, contract.require_observed_price()?)
    }

    /// Implied volatility of `contract` at `observed_price`.
    ///
    /// Any volatility already set on the contract is ignored.
    pub fn solve(&self, contract: &Contract, observed_price: Price) -> Result<Volatility> {
        self.settings.validate()?;
        contract.validate()?;
        ensure_european_no_dividend(contract, "implied volatility")?;
        if !(observed_price >= 0.0 && observed_price.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "observed price must be non-negative, got {observed_price}"
            )));
        }

        let (side, s, k, r, t) = (
            contract.side(),
            contract.spot(),
            contract.strike(),
            contract.rate(),
            contract.maturity(),
        );
        let ImpliedVolSettings {
            max_iterations,
            tolerance,
            initial_guess,
        } = self.settings;
        debug!(%side, observed_price, initial_guess, "solving implied volatility");

        let options = NewtonOptions {
            max_iterations,
            accuracy: tolerance,
            min_derivative: MIN_VEGA,
        };
        let mut iteration = 0_usize;
        newton_raphson(
            |v| {
                let residual = black_scholes_price(side, s, k, r, v, t) - observed_price;
                let vega = black_scholes_vega(s, k, r, v, t);
                trace!(iteration, volatility = v, residual, vega, "newton step");
                iteration += 1;
                Ok((residual, vega))
            },
            initial_guess,
            options,
            |v| v > 0.0,
        )
        .map_err(|e| {
            warn!(observed_price, error = %e, "implied volatility failed");
            e
        })
    }
}
