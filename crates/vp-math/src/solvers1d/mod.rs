//! 1D root-finding.

use vp_core::{
    errors::{Error, Result},
    Real,
};

/// Default iteration budget.
pub const MAX_ITERATIONS: usize = 100;

/// Default absolute accuracy on `|f(x)|`.
pub const DEFAULT_ACCURACY: Real = 1.0e-10;

/// Controls for [`newton_raphson`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonOptions {
    /// Iteration budget.
    pub max_iterations: usize,
    /// Success when `|f(x)| < accuracy`.
    pub accuracy: Real,
    /// Derivatives with `|f'(x)|` below this abort the search.
    pub min_derivative: Real,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            accuracy: DEFAULT_ACCURACY,
            min_derivative: f64::EPSILON,
        }
    }
}

/// Plain Newton-Raphson iteration `x ← x − f(x)/f'(x)` from `x0`.
///
/// `f_df` returns `(f(x), f'(x))` and may itself fail; its error is
/// propagated unchanged. There is no bracketing fallback:
///
/// * `|f'(x)| < min_derivative` → [`Error::NumericalInstability`]
/// * a non-finite iterate, or one rejected by `admissible` →
///   [`Error::NumericalInstability`]
/// * budget exhausted → [`Error::ConvergenceFailure`]
///
/// `max_iterations` counts function evaluations, so a budget of `n` allows
/// at most `n − 1` Newton steps before the final check.
pub fn newton_raphson<F, A>(
    mut f_df: F,
    x0: Real,
    options: NewtonOptions,
    admissible: A,
) -> Result<Real>
where
    F: FnMut(Real) -> Result<(Real, Real)>,
    A: Fn(Real) -> bool,
{
    let mut x = x0;
    let mut residual = f64::INFINITY;

    for _ in 0..options.max_iterations {
        let (fx, dfx) = f_df(x)?;
        residual = fx.abs();
        if residual < options.accuracy {
            return Ok(x);
        }
        if dfx.is_nan() || dfx.abs() < options.min_derivative {
            return Err(Error::NumericalInstability(format!(
                "derivative {dfx:e} at x = {x} is below {:e}",
                options.min_derivative
            )));
        }
        let next = x - fx / dfx;
        if !next.is_finite() || !admissible(next) {
            return Err(Error::NumericalInstability(format!(
                "Newton step from x = {x} left the admissible domain (x = {next})"
            )));
        }
        x = next;
    }

    Err(Error::ConvergenceFailure {
        iterations: options.max_iterations,
        residual,
    })
}
