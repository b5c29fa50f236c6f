//! Lattice methods for option pricing.
//!
//! * [`BinomialTree`]: recombining Cox-Ross-Rubinstein tree
//! * [`backward_induction`]: price by rolling back a single layer buffer
//! * [`Lattice`]: the full underlying and option-value grids, for callers
//!   that want to inspect the tree

pub mod binomial_tree;

pub use binomial_tree::BinomialTree;

use vp_core::{DiscountFactor, Real};
use vp_instruments::Payoff;
use vp_math::Matrix;

// ─── Backward-induction pricing ───────────────────────────────────────────────

/// Price by backward induction on a binomial tree.
///
/// # Arguments
/// * `tree`: the binomial tree (already constructed)
/// * `payoff`: exercise value as a function of the underlying
/// * `discount`: per-step discount factor
/// * `early_exercise`: take `max(intrinsic, continuation)` at every node
///   (American) instead of the continuation value alone (European)
///
/// Uses `O(steps)` memory.
pub fn backward_induction(
    tree: &BinomialTree,
    payoff: &dyn Payoff,
    discount: DiscountFactor,
    early_exercise: bool,
) -> Real {
    let n = tree.steps();
    let q = tree.probability_up();

    // Terminal values at maturity, indexed by down-moves
    let mut values: Vec<Real> = (0..tree.size(n))
        .map(|i| payoff.value(tree.underlying(i, n)))
        .collect();

    for j in (0..n).rev() {
        for i in 0..tree.size(j) {
            let hold = discount * (q * values[i] + (1.0 - q) * values[i + 1]);
            values[i] = if early_exercise {
                hold.max(payoff.value(tree.underlying(i, j)))
            } else {
                hold
            };
        }
    }

    values[0]
}

// ─── Lattice ──────────────────────────────────────────────────────────────────

/// The full `(steps + 1) × (steps + 1)` grids of a rolled-back tree.
///
/// Entry `(i, j)` refers to node `(i, j)` of the tree (`i` down-moves after
/// `j` steps). Entries with `i > j` are not tree nodes and hold zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lattice {
    underlying: Matrix,
    values: Matrix,
}

impl Lattice {
    /// Roll back `tree` keeping every layer. `O(steps²)` time and memory.
    ///
    /// Arguments as for [`backward_induction`].
    pub fn build(
        tree: &BinomialTree,
        payoff: &dyn Payoff,
        discount: DiscountFactor,
        early_exercise: bool,
    ) -> Self {
        let n = tree.steps();
        let q = tree.probability_up();
        let mut underlying = Matrix::zeros(n + 1, n + 1);
        let mut values = Matrix::zeros(n + 1, n + 1);

        for j in 0..=n {
            for i in 0..=j {
                underlying[(i, j)] = tree.underlying(i, j);
            }
        }
        for i in 0..=n {
            values[(i, n)] = payoff.value(underlying[(i, n)]);
        }
        for j in (0..n).rev() {
            for i in 0..=j {
                let hold =
                    discount * (q * values[(i, j + 1)] + (1.0 - q) * values[(i + 1, j + 1)]);
                values[(i, j)] = if early_exercise {
                    hold.max(payoff.value(underlying[(i, j)]))
                } else {
                    hold
                };
            }
        }

        Self { underlying, values }
    }

    /// The root value `V(0, 0)`.
    pub fn price(&self) -> Real {
        self.values[(0, 0)]
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.values.cols() - 1
    }

    /// Underlying-price grid.
    pub fn underlying(&self) -> &Matrix {
        &self.underlying
    }

    /// Option-value grid.
    pub fn values(&self) -> &Matrix {
        &self.values
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
