//! Monte Carlo simulation framework.
//!
//! * [`GbmPathGenerator`]: turns a block of normal draws into geometric
//!   Brownian motion price paths
//! * [`PathBatch`]: the simulated `paths × steps` price matrix
//! * [`PathPricer`]: trait for evaluating a discounted payoff on one path
//! * [`MonteCarloModel`]: orchestrates generation and statistics collection

use vp_core::{
    ensure,
    errors::{Error, Result},
    DiscountFactor, Rate, Real, Time, Volatility,
};
use vp_instruments::Payoff;
use vp_math::{Matrix, RandomSource, Statistics};

// ─── PathBatch ────────────────────────────────────────────────────────────────

/// A batch of simulated price paths.
///
/// Row `p` is path `p`; column `k` is the price after `k + 1` steps, so the
/// spot itself is not stored and the last column holds terminal prices.
/// With antithetic sampling, row `p + base_paths` is the mirror of row `p`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathBatch {
    prices: Matrix,
    antithetic: bool,
}

impl PathBatch {
    /// Total number of paths (twice the draws when antithetic).
    pub fn paths(&self) -> usize {
        self.prices.rows()
    }

    /// Number of independent draws behind the batch.
    pub fn base_paths(&self) -> usize {
        if self.antithetic {
            self.paths() / 2
        } else {
            self.paths()
        }
    }

    /// Number of time steps per path.
    pub fn steps(&self) -> usize {
        self.prices.cols()
    }

    /// Whether the lower half mirrors the upper half.
    pub fn is_antithetic(&self) -> bool {
        self.antithetic
    }

    /// Prices along path `p`.
    pub fn path(&self, p: usize) -> Vec<Real> {
        self.prices.row(p)
    }

    /// Terminal price of every path.
    pub fn terminal(&self) -> Vec<Real> {
        self.prices.column(self.steps() - 1)
    }

    /// The full price matrix.
    pub fn prices(&self) -> &Matrix {
        &self.prices
    }

    /// Consume and return the price matrix.
    pub fn into_matrix(self) -> Matrix {
        self.prices
    }
}

// ─── GbmPathGenerator ─────────────────────────────────────────────────────────

/// Risk-neutral geometric Brownian motion on a uniform time grid.
///
/// Per step the log-price moves by `(r − σ²/2)Δt + σ√Δt·z`; paths are
/// `S·exp(cumsum(…))` along the time axis.
#[derive(Debug, Clone, Copy)]
pub struct GbmPathGenerator {
    spot: Real,
    rate: Rate,
    volatility: Volatility,
    maturity: Time,
    steps: usize,
}

impl GbmPathGenerator {
    /// Create a generator for `steps` equal steps up to `maturity`.
    pub fn new(
        spot: Real,
        rate: Rate,
        volatility: Volatility,
        maturity: Time,
        steps: usize,
    ) -> Result<Self> {
        if steps == 0 {
            return Err(Error::InvalidArgument("simulation needs at least one time step".into()));
        }
        if !(spot > 0.0 && volatility > 0.0 && maturity > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "GBM: spot ({spot}), volatility ({volatility}) and maturity ({maturity}) must be positive"
            )));
        }
        Ok(Self {
            spot,
            rate,
            volatility,
            maturity,
            steps,
        })
    }

    /// Time step `Δt`.
    pub fn dt(&self) -> Time {
        self.maturity / self.steps as Real
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Simulate `paths` paths from one block of draws.
    ///
    /// With `antithetic`, the negated draws are appended, giving `2·paths`
    /// rows without any extra random numbers.
    pub fn generate(
        &self,
        source: &dyn RandomSource,
        paths: usize,
        seed: Option<u64>,
        antithetic: bool,
    ) -> Result<PathBatch> {
        if paths == 0 {
            return Err(Error::InvalidArgument("simulation needs at least one path".into()));
        }
        let mut draws = source.normal(paths, self.steps, seed);
        ensure!(
            draws.rows() == paths && draws.cols() == self.steps,
            "random source returned {}×{} draws, expected {paths}×{}",
            draws.rows(),
            draws.cols(),
            self.steps
        );
        if antithetic {
            draws = draws.vstack(&-&draws);
        }

        let dt = self.dt();
        let drift = (self.rate - 0.5 * self.volatility * self.volatility) * dt;
        let diffusion = self.volatility * dt.sqrt();
        let spot = self.spot;
        let prices = draws
            .map(|z| drift + diffusion * z)
            .cumsum_rows()
            .map(|x| spot * x.exp());

        Ok(PathBatch { prices, antithetic })
    }
}

// ─── PathPricer ───────────────────────────────────────────────────────────────

/// A trait for computing the discounted payoff from a sample path.
pub trait PathPricer: Send + Sync {
    /// Evaluate the discounted payoff for a given path.
    fn value(&self, path: &[Real]) -> Real;
}

/// A European payoff pricer: evaluates `payoff(S_T) * discount`.
#[derive(Debug)]
pub struct EuropeanPathPricer<P> {
    payoff: P,
    discount: DiscountFactor,
}

impl<P: Payoff> EuropeanPathPricer<P> {
    /// Create a European pricer with payoff and discount factor to expiry.
    pub fn new(payoff: P, discount: DiscountFactor) -> Self {
        Self { payoff, discount }
    }
}

impl<P: Payoff> PathPricer for EuropeanPathPricer<P> {
    fn value(&self, path: &[Real]) -> Real {
        path.last().map_or(0.0, |&s| self.payoff.value(s) * self.discount)
    }
}

// ─── MonteCarloModel ──────────────────────────────────────────────────────────

/// A Monte Carlo simulation orchestrator.
///
/// Combines a path generator with a random source and collects statistics
/// across the simulated paths.
#[derive(Debug)]
pub struct MonteCarloModel<'a> {
    generator: GbmPathGenerator,
    source: &'a dyn RandomSource,
}

/// Sample statistics of one simulation together with the paths behind them.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Statistics of the discounted payoff. With antithetic sampling each
    /// sample is the average of a path and its mirror.
    pub statistics: Statistics,
    /// The simulated paths.
    pub batch: PathBatch,
}

impl<'a> MonteCarloModel<'a> {
    /// Create a new Monte Carlo model.
    pub fn new(generator: GbmPathGenerator, source: &'a dyn RandomSource) -> Self {
        Self { generator, source }
    }

    /// Simulate `n_paths` draws and price every path.
    pub fn simulate(
        &self,
        pricer: &dyn PathPricer,
        n_paths: usize,
        seed: Option<u64>,
        antithetic: bool,
    ) -> Result<SimulationOutcome> {
        let batch = self.generator.generate(self.source, n_paths, seed, antithetic)?;
        let values: Vec<Real> = (0..batch.paths())
            .map(|p| pricer.value(&batch.path(p)))
            .collect();

        let statistics: Statistics = if antithetic {
            let (plain, mirrored) = values.split_at(n_paths);
            plain
                .iter()
                .zip(mirrored)
                .map(|(a, b)| 0.5 * (a + b))
                .collect()
        } else {
            values.into_iter().collect()
        };

        Ok(SimulationOutcome { statistics, batch })
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
