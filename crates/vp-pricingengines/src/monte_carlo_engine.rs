//! Monte Carlo engine for European options under geometric Brownian motion.

use crate::analytic_european_engine::ensure_european_no_dividend;
use tracing::debug;
use vp_core::{errors::Result, fail, Real};
use vp_instruments::{Contract, PricingEngine};
use vp_math::{RandomSource, ZigguratNormalSource};
use vp_methods::{EuropeanPathPricer, GbmPathGenerator, MonteCarloModel, PathBatch};

/// Default number of simulated paths.
pub const DEFAULT_PATHS: usize = 10_000;

/// Default number of time steps per path (one per trading day).
pub const DEFAULT_TIME_STEPS: usize = 252;

/// Knobs for [`MonteCarloEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationSettings {
    /// Number of independent draws (doubled when `antithetic`).
    pub paths: usize,
    /// Time steps per path.
    pub steps: usize,
    /// Append the mirrored paths `−z` to the batch.
    pub antithetic: bool,
    /// Seed for the random source; `None` draws fresh entropy per call.
    pub seed: Option<u64>,
    /// Return the simulated paths alongside the price.
    pub keep_paths: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            paths: DEFAULT_PATHS,
            steps: DEFAULT_TIME_STEPS,
            antithetic: false,
            seed: None,
            keep_paths: false,
        }
    }
}

impl SimulationSettings {
    /// Set the number of paths.
    pub fn with_paths(mut self, paths: usize) -> Self {
        self.paths = paths;
        self
    }

    /// Set the number of time steps.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Enable or disable antithetic sampling.
    pub fn with_antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Fix the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Keep (or drop) the simulated paths.
    pub fn with_paths_kept(mut self, keep: bool) -> Self {
        self.keep_paths = keep;
        self
    }
}

/// Simulated price with its sampling error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Mean discounted payoff.
    pub price: Real,
    /// Standard error of `price`; `None` with a single sample.
    pub std_error: Option<Real>,
    /// The simulated paths, when [`SimulationSettings::keep_paths`] was set.
    pub paths: Option<PathBatch>,
}

/// Monte Carlo engine.
///
/// Simulates `S·exp(Σ((r − σ²/2)Δt + σ√Δt·z))` and averages the discounted
/// terminal payoff. Only European contracts without dividends are accepted.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine<R = ZigguratNormalSource> {
    settings: SimulationSettings,
    source: R,
}

impl MonteCarloEngine {
    /// Engine drawing from [`ZigguratNormalSource`].
    pub fn with_settings(settings: SimulationSettings) -> Self {
        Self::new(settings, ZigguratNormalSource)
    }
}

impl<R: RandomSource> MonteCarloEngine<R> {
    /// Engine drawing from `source`.
    pub fn new(settings: SimulationSettings, source: R) -> Self {
        Self { settings, source }
    }

    /// The engine's settings.
    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }
}

impl<R: RandomSource> PricingEngine for MonteCarloEngine<R> {
    type Output = SimulationResult;

    fn calculate(&self, contract: &Contract) -> Result<SimulationResult> {
        contract.validate()?;
        ensure_european_no_dividend(contract, "Monte Carlo")?;
        let v = contract.require_volatility()?;
        let s = &self.settings;

        let generator = GbmPathGenerator::new(
            contract.spot(),
            contract.rate(),
            v,
            contract.maturity(),
            s.steps,
        )?;
        let discount = (-contract.rate() * contract.maturity()).exp();
        let pricer = EuropeanPathPricer::new(contract.payoff(), discount);
        debug!(
            paths = s.paths,
            steps = s.steps,
            antithetic = s.antithetic,
            seed = ?s.seed,
            "simulation valuation"
        );

        let outcome = MonteCarloModel::new(generator, &self.source).simulate(
            &pricer,
            s.paths,
            s.seed,
            s.antithetic,
        )?;
        let Some(price) = outcome.statistics.mean() else {
            fail!("simulation produced no samples");
        };

        Ok(SimulationResult {
            price,
            std_error: outcome.statistics.error_estimate(),
            paths: s.keep_paths.then_some(outcome.batch),
        })
    }
}
