//! Option sensitivities.
//!
//! Reporting conventions:
//!
//! | Greek | Unit |
//! |---|---|
//! | `delta` | per 1.0 move in spot |
//! | `gamma` | per 1.0 move in spot, squared |
//! | `vega` | per **1 vol point** (0.01 absolute), i.e. `∂V/∂σ / 100` |
//! | `theta` | per **calendar day**, i.e. `∂V/∂t / 365` |
//! | `rho` | per **1 rate point** (0.01 absolute), i.e. `∂V/∂r / 100` |
//!
//! Code that needs the raw `∂V/∂σ` (the implied-volatility solver) uses
//! [`black_scholes_vega`](crate::analytic_european_engine::black_scholes_vega)
//! directly and never rescales `Greeks::vega`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use vp_core::{errors::Error, Real};

/// Divisor turning `∂V/∂σ` into a per-vol-point vega.
pub const VEGA_SCALE: Real = 100.0;

/// Divisor turning `∂V/∂r` into a per-rate-point rho.
pub const RHO_SCALE: Real = 100.0;

/// Divisor turning an annual theta into a per-day theta.
pub const DAYS_PER_YEAR: Real = 365.0;

/// Names of the individual sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Greek {
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ, per vol point
    Vega,
    /// ∂V/∂t, per day
    Theta,
    /// ∂V/∂r, per rate point
    Rho,
}

impl Greek {
    /// Every greek, in reporting order.
    pub const ALL: [Greek; 5] = [
        Greek::Delta,
        Greek::Vega,
        Greek::Theta,
        Greek::Rho,
        Greek::Gamma,
    ];

    /// Lower-case name, as used for lookups.
    pub fn name(self) -> &'static str {
        match self {
            Greek::Delta => "delta",
            Greek::Gamma => "gamma",
            Greek::Vega => "vega",
            Greek::Theta => "theta",
            Greek::Rho => "rho",
        }
    }
}

impl fmt::Display for Greek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Greek {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Greek::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidArgument(format!("unknown greek {s:?}")))
    }
}

/// First- and second-order sensitivities of one contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S.
    pub delta: Real,
    /// ∂V/∂σ per vol point.
    pub vega: Real,
    /// ∂V/∂t per calendar day.
    pub theta: Real,
    /// ∂V/∂r per rate point.
    pub rho: Real,
    /// ∂²V/∂S².
    pub gamma: Real,
}

impl Greeks {
    /// Value of one sensitivity.
    pub fn value(&self, greek: Greek) -> Real {
        match greek {
            Greek::Delta => self.delta,
            Greek::Gamma => self.gamma,
            Greek::Vega => self.vega,
            Greek::Theta => self.theta,
            Greek::Rho => self.rho,
        }
    }

    /// Lenient lookup by name.
    ///
    /// Unknown names give `None`, which callers must read as "value
    /// unavailable" rather than as success.
    pub fn get(&self, name: &str) -> Option<Real> {
        name.parse::<Greek>().ok().map(|g| self.value(g))
    }

    /// All sensitivities keyed by name.
    pub fn to_map(&self) -> BTreeMap<&'static str, Real> {
        Greek::ALL
            .into_iter()
            .map(|g| (g.name(), self.value(g)))
            .collect()
    }
}
