//! Recombining Cox-Ross-Rubinstein binomial tree.
//!
//! Node `(i, j)` is the state after `j` steps of which `i` were down-moves,
//! so `0 ≤ i ≤ j ≤ steps` and the underlying there is `S·dⁱ·u^(j−i)`.

use vp_core::{
    errors::{Error, Result},
    Rate, Real, Time, Volatility,
};

/// A recombining binomial tree with equal and opposite log-jumps.
///
/// `u = e^(σ√Δt)`, `d = 1/u`, and the risk-neutral up-probability is
/// `q = (e^((r − q_div)Δt) − d) / (u − d)`.
#[derive(Debug, Clone)]
pub struct BinomialTree {
    x0: Real,
    dt: Time,
    steps: usize,
    up: Real,
    down: Real,
    pu: Real,
}

impl BinomialTree {
    /// Cox-Ross-Rubinstein tree.
    ///
    /// Fails with [`Error::InvalidArgument`] for zero steps or a
    /// non-positive spot / volatility / maturity, and with
    /// [`Error::NumericalInstability`] when the up-probability falls outside
    /// `[0, 1]`. The probability is never clamped: an out-of-range value
    /// means the step is too coarse for the drift and the tree admits
    /// arbitrage.
    pub fn cox_ross_rubinstein(
        spot: Real,
        volatility: Volatility,
        rate: Rate,
        dividend_yield: Rate,
        maturity: Time,
        steps: usize,
    ) -> Result<Self> {
        if steps == 0 {
            return Err(Error::InvalidArgument("lattice needs at least one step".into()));
        }
        if !(spot > 0.0 && volatility > 0.0 && maturity > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "CRR: spot ({spot}), volatility ({volatility}) and maturity ({maturity}) must be positive"
            )));
        }
        let dt = maturity / steps as Real;
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = ((rate - dividend_yield) * dt).exp();
        let pu = (growth - down) / (up - down);
        if !(0.0..=1.0).contains(&pu) {
            return Err(Error::NumericalInstability(format!(
                "CRR: risk-neutral probability {pu} outside [0, 1] \
                 (σ = {volatility}, r − q = {}, {steps} steps)",
                rate - dividend_yield
            )));
        }
        Ok(Self {
            x0: spot,
            dt,
            steps,
            up,
            down,
            pu,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Initial underlying value (spot price).
    pub fn x0(&self) -> Real {
        self.x0
    }

    /// Up-move factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down-move factor `d = 1/u`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Risk-neutral up-probability `q`.
    pub fn probability_up(&self) -> Real {
        self.pu
    }

    /// Number of nodes at step `j` (always `j + 1`).
    pub fn size(&self, j: usize) -> usize {
        j + 1
    }

    /// Underlying value at node `(i, j)`: `i` down-moves after `j` steps.
    pub fn underlying(&self, i: usize, j: usize) -> Real {
        debug_assert!(i <= j && j <= self.steps);
        self.x0 * self.down.powi(i as i32) * self.up.powi((j - i) as i32)
    }
}
