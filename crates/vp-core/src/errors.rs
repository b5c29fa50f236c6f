//! Error types for vanilla-pricer.
//!
//! Every request that cannot be honoured is reported through a single
//! `thiserror`-derived enum. Nothing in the workspace substitutes a default
//! value or a `None` for a failed valuation. The `ensure!` and `fail!`
//! macros cover the common precondition and runtime cases.

use thiserror::Error;

/// The top-level error type used throughout vanilla-pricer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A parameter required by the calculation is unset (e.g. volatility
    /// before an implied-volatility solve).
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// The method / contract combination is not implemented, e.g. the
    /// closed-form formula on an American or dividend-paying contract.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// A numerical method hit a state it cannot continue from, such as a
    /// risk-neutral probability outside `[0, 1]` or a vanishing derivative.
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// An iterative method exhausted its iteration budget.
    #[error("no convergence after {iterations} iterations (residual {residual:e})")]
    ConvergenceFailure {
        /// Iterations performed.
        iterations: usize,
        /// Absolute residual at the last iterate.
        residual: f64,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),
}

/// Shorthand `Result` type used throughout vanilla-pricer.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use vp_core::{ensure, errors::Error};
/// fn positive(x: f64) -> vp_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use vp_core::{fail, errors::Error};
/// fn always_err() -> vp_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
