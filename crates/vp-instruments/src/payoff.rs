//! Option payoffs.
//!
//! Payoffs describe the exercise value of an option as a function of the
//! underlying asset price.

use std::fmt;
use std::str::FromStr;
use vp_core::{
    errors::{Error, Result},
    Real,
};

/// Largest number of points [`PlainVanillaPayoff::profile`] will produce.
pub const MAX_PROFILE_POINTS: usize = 10_000_000;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(Error::InvalidArgument(format!("unknown option type {other:?}"))),
        }
    }
}

/// Base trait for option payoffs.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at exercise/expiry.
    fn value(&self, price: Real) -> Real;

    /// Human-readable name.
    fn name(&self) -> &str;
}

/// Standard "plain vanilla" European/American option payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }

    /// Payoff over the terminal values `start, start + size, …` strictly
    /// below `stop`.
    ///
    /// The grid is half-open: `stop` itself is never a grid point. Fails with
    /// [`Error::InvalidArgument`] unless `size` is positive and finite, or
    /// when the grid would exceed [`MAX_PROFILE_POINTS`].
    pub fn profile(&self, start: Real, stop: Real, size: Real) -> Result<Vec<Real>> {
        if !(size.is_finite() && size > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "payoff grid step must be positive, got {size}"
            )));
        }
        if !(start.is_finite() && stop.is_finite()) {
            return Err(Error::InvalidArgument(format!(
                "payoff grid bounds must be finite, got [{start}, {stop})"
            )));
        }
        let count = ((stop - start) / size).ceil().max(0.0);
        if !(count.is_finite() && count <= MAX_PROFILE_POINTS as Real) {
            return Err(Error::InvalidArgument(format!(
                "payoff grid [{start}, {stop}) with step {size} exceeds \
                 {MAX_PROFILE_POINTS} points"
            )));
        }
        let n = count as usize;
        Ok((0..n)
            .map(|i| self.value(start + i as Real * size))
            .collect())
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Real) -> Real {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }

    fn name(&self) -> &str {
        "Vanilla"
    }
}

impl fmt::Display for PlainVanillaPayoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {}", self.name(), self.option_type, self.strike)
    }
}
