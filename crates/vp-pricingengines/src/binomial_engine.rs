//! Cox-Ross-Rubinstein binomial engine for European and American options.

use tracing::{debug, warn};
use vp_core::{errors::Result, Compounding, Real};
use vp_instruments::{Contract, PricingEngine};
use vp_methods::{backward_induction, BinomialTree, Lattice};

/// Default number of time steps.
pub const DEFAULT_LATTICE_STEPS: usize = 500;

/// Knobs for [`BinomialEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeSettings {
    /// Number of time steps (at least one).
    pub steps: usize,
    /// Convention for the per-step discount factor.
    pub compounding: Compounding,
    /// Return the full underlying and value grids alongside the price.
    pub keep_lattice: bool,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            steps: DEFAULT_LATTICE_STEPS,
            compounding: Compounding::Continuous,
            keep_lattice: false,
        }
    }
}

impl LatticeSettings {
    /// Set the number of steps.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Set the discounting convention.
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Keep (or drop) the full grids.
    pub fn with_lattice(mut self, keep: bool) -> Self {
        self.keep_lattice = keep;
        self
    }
}

/// Price plus, on request, the grids it was rolled back on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeResult {
    /// Present value at the root node.
    pub price: Real,
    /// The full grids, when [`LatticeSettings::keep_lattice`] was set.
    pub lattice: Option<Lattice>,
}

/// Binomial lattice engine.
///
/// Handles both exercise styles and a continuous dividend yield, which
/// enters through the risk-neutral up-probability. Each step is discounted
/// by `compounding.discount_factor(r, Δt)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinomialEngine {
    settings: LatticeSettings,
}

impl BinomialEngine {
    /// Create an engine with the given settings.
    pub fn new(settings: LatticeSettings) -> Self {
        Self { settings }
    }

    /// The engine's settings.
    pub fn settings(&self) -> &LatticeSettings {
        &self.settings
    }
}

impl PricingEngine for BinomialEngine {
    type Output = LatticeResult;

    fn calculate(&self, contract: &Contract) -> Result<LatticeResult> {
        contract.validate()?;
        let v = contract.require_volatility()?;
        let LatticeSettings {
            steps,
            compounding,
            keep_lattice,
        } = self.settings;

        let tree = BinomialTree::cox_ross_rubinstein(
            contract.spot(),
            v,
            contract.rate(),
            contract.dividend_yield(),
            contract.maturity(),
            steps,
        )
        .map_err(|e| {
            warn!(steps, error = %e, "binomial tree rejected");
            e
        })?;

        let discount = compounding.discount_factor(contract.rate(), tree.dt());
        let payoff = contract.payoff();
        let early_exercise = contract.exercise().allows_early_exercise();
        debug!(
            steps,
            exercise = %contract.exercise(),
            probability_up = tree.probability_up(),
            keep_lattice,
            "lattice valuation"
        );

        if keep_lattice {
            let lattice = Lattice::build(&tree, &payoff, discount, early_exercise);
            Ok(LatticeResult {
                price: lattice.price(),
                lattice: Some(lattice),
            })
        } else {
            Ok(LatticeResult {
                price: backward_induction(&tree, &payoff, discount, early_exercise),
                lattice: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic_european_engine::AnalyticEuropeanEngine;
    use approx::assert_abs_diff_eq;
    use vp_core::errors::Error;
    use vp_instruments::OptionType;

    fn contract(side: OptionType, american: bool) -> Contract {
        let b = Contract::builder(side, 100.0, 100.0, 0.05, 1.0).volatility(0.2);
        let b = if american { b.american() } else { b };
        b.build().unwrap()
    }

    #[test]
    fn default_settings() {
        let s = LatticeSettings::default();
        assert_eq!(s.steps, 500);
        assert_eq!(s.compounding, Compounding::Continuous);
        assert!(!s.keep_lattice);
    }

    #[test]
    fn european_converges_to_black_scholes() {
        for side in [OptionType::Call, OptionType::Put] {
            let c = contract(side, false);
            let bs = AnalyticEuropeanEngine.calculate(&c).unwrap();
            let tree = BinomialEngine::default().calculate(&c).unwrap();
            assert_abs_diff_eq!(tree.price, bs, epsilon = 0.01);
            assert!(tree.lattice.is_none());
        }
    }

    #[test]
    fn error_shrinks_with_steps() {
        let c = contract(OptionType::Call, false);
        let bs = AnalyticEuropeanEngine.calculate(&c).unwrap();
        let err = |n| {
            let r = BinomialEngine::new(LatticeSettings::default().with_steps(n))
                .calculate(&c)
                .unwrap();
            (r.price - bs).abs()
        };
        assert!(err(1000) < err(10));
    }

    #[test]
    fn american_put_carries_early_exercise_premium() {
        let eu = BinomialEngine::default()
            .calculate(&contract(OptionType::Put, false))
            .unwrap();
        let am = BinomialEngine::default()
            .calculate(&contract(OptionType::Put, true))
            .unwrap();
        assert!(am.price >= 5.5735, "American put {}", am.price);
        assert!(am.price > eu.price);
    }

    #[test]
    fn american_call_without_dividend_equals_european() {
        let eu = BinomialEngine::default()
            .calculate(&contract(OptionType::Call, false))
            .unwrap();
        let am = BinomialEngine::default()
            .calculate(&contract(OptionType::Call, true))
            .unwrap();
        assert_abs_diff_eq!(am.price, eu.price, epsilon = 1e-10);
    }

    #[test]
    fn dividend_lowers_call_value() {
        let plain = contract(OptionType::Call, true);
        let div = Contract::builder(OptionType::Call, 100.0, 100.0, 0.05, 1.0)
            .volatility(0.2)
            .dividend_yield(0.04)
            .american()
            .build()
            .unwrap();
        let engine = BinomialEngine::new(LatticeSettings::default().with_steps(200));
        assert!(engine.calculate(&div).unwrap().price < engine.calculate(&plain).unwrap().price);
    }

    #[test]
    fn kept_lattice_matches_rolled_price() {
        let c = contract(OptionType::Put, true);
        let settings = LatticeSettings::default().with_steps(60);
        let rolled = BinomialEngine::new(settings).calculate(&c).unwrap();
        let kept = BinomialEngine::new(settings.with_lattice(true))
            .calculate(&c)
            .unwrap();
        let lattice = kept.lattice.expect("lattice requested");
        assert_eq!(lattice.steps(), 60);
        assert_abs_diff_eq!(kept.price, rolled.price, epsilon = 1e-12);
        assert_abs_diff_eq!(lattice.underlying()[(0, 0)], 100.0, epsilon = 1e-12);
    }

    #[test]
    fn compounding_changes_discounting() {
        let c = contract(OptionType::Call, false);
        let cont = BinomialEngine::new(LatticeSettings::default().with_steps(100))
            .calculate(&c)
            .unwrap();
        let simple = BinomialEngine::new(
            LatticeSettings::default()
                .with_steps(100)
                .with_compounding(Compounding::Simple),
        )
        .calculate(&c)
        .unwrap();
        // 1/(1 + rΔt) > e^(−rΔt), so simple discounting values slightly higher
        assert!(simple.price > cont.price);
        assert_abs_diff_eq!(simple.price, cont.price, epsilon = 0.01);
    }

    #[test]
    fn discrete_compounding_discounts_least() {
        let c = contract(OptionType::Call, false);
        let settings = LatticeSettings::default().with_steps(100);
        let cont = BinomialEngine::new(settings).calculate(&c).unwrap();
        let simple = BinomialEngine::new(settings.with_compounding(Compounding::Simple))
            .calculate(&c)
            .unwrap();
        let discrete = BinomialEngine::new(settings.with_compounding(Compounding::Compounded))
            .calculate(&c)
            .unwrap();
        // (1 + r)^(−Δt) discounts at an effective ln(1 + r), below both other conventions
        assert!(discrete.price > simple.price);
        assert!(discrete.price > cont.price);
        assert_abs_diff_eq!(discrete.price, cont.price, epsilon = 0.05);
    }

    #[test]
    fn coarse_tree_is_unstable() {
        let c = Contract::builder(OptionType::Call, 100.0, 100.0, 0.5, 1.0)
            .volatility(0.01)
            .build()
            .unwrap();
        let r = BinomialEngine::new(LatticeSettings::default().with_steps(1)).calculate(&c);
        assert!(matches!(r, Err(Error::NumericalInstability(_))), "{r:?}");
    }

    #[test]
    fn zero_steps_rejected() {
        let r = BinomialEngine::new(LatticeSettings::default().with_steps(0))
            .calculate(&contract(OptionType::Call, false));
        assert!(matches!(r, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn missing_volatility() {
        let c = Contract::builder(OptionType::Put, 100.0, 100.0, 0.05, 1.0)
            .american()
            .build()
            .unwrap();
        assert!(matches!(
            BinomialEngine::default().calculate(&c),
            Err(Error::MissingParameter(_))
        ));
    }
}
