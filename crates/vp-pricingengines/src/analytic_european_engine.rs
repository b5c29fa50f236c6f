//! Analytic European option engine (Black-Scholes-Merton).
//!
//! Prices European vanilla options on a non-dividend-paying underlying with
//! the closed-form Black-Scholes-Merton formula and computes the Greeks.
//!
//! The formula here carries no dividend term, so contracts with a non-zero
//! dividend yield are rejected rather than priced with a silently wrong
//! forward.

use crate::greeks::{Greeks, DAYS_PER_YEAR, RHO_SCALE, VEGA_SCALE};
use tracing::{debug, warn};
use vp_core::{
    errors::{Error, Result},
    Rate, Real, Time, Volatility,
};
use vp_instruments::{Contract, ExerciseStyle, OptionType, PricingEngine};
use vp_math::{normal_cdf, normal_pdf};

/// `(d1, d2)` of the Black-Scholes-Merton formula without dividends.
///
/// `d1 = (ln(S/K) + (r + σ²/2)t) / (σ√t)`, `d2 = d1 − σ√t`.
pub fn d1_d2(
    spot: Real,
    strike: Real,
    rate: Rate,
    volatility: Volatility,
    t: Time,
) -> (Real, Real) {
    let std_dev = volatility * t.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * t) / std_dev;
    (d1, d1 - std_dev)
}

/// Black-Scholes-Merton price.
///
/// $$V = \phi\,\big(S\,N(\phi d_1) - K e^{-rt} N(\phi d_2)\big)$$
///
/// with `φ = +1` for a call and `−1` for a put.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    rate: Rate,
    volatility: Volatility,
    t: Time,
) -> Real {
    let phi = option_type.sign();
    let (d1, d2) = d1_d2(spot, strike, rate, volatility, t);
    phi * (spot * normal_cdf(phi * d1) - strike * (-rate * t).exp() * normal_cdf(phi * d2))
}

/// Unscaled vega `∂V/∂σ = S·φ(d1)·√t` (identical for calls and puts).
pub fn black_scholes_vega(
    spot: Real,
    strike: Real,
    rate: Rate,
    volatility: Volatility,
    t: Time,
) -> Real {
    let (d1, _) = d1_d2(spot, strike, rate, volatility, t);
    spot * normal_pdf(d1) * t.sqrt()
}

/// Black-Scholes-Merton Greeks in the reporting units of [`Greeks`].
pub fn black_scholes_greeks(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    rate: Rate,
    volatility: Volatility,
    t: Time,
) -> Greeks {
    let (d1, d2) = d1_d2(spot, strike, rate, volatility, t);
    let sqrt_t = t.sqrt();
    let df = (-rate * t).exp();
    let pdf_d1 = normal_pdf(d1);

    // Call-side terms; the put adjusts by the carry of the strike.
    let call_theta =
        -volatility / (2.0 * sqrt_t) * spot * pdf_d1 - rate * strike * df * normal_cdf(d2);
    let call_rho = t * df * strike * normal_cdf(d2);

    let (delta, theta, rho) = match option_type {
        OptionType::Call => (normal_cdf(d1), call_theta, call_rho),
        OptionType::Put => (
            -normal_cdf(-d1),
            call_theta + rate * strike * df,
            call_rho - t * strike * df,
        ),
    };

    Greeks {
        delta,
        vega: spot * pdf_d1 * sqrt_t / VEGA_SCALE,
        theta: theta / DAYS_PER_YEAR,
        rho: rho / RHO_SCALE,
        gamma: pdf_d1 / (volatility * spot * sqrt_t),
    }
}

/// Reject what the closed form cannot value: early exercise or dividends.
pub(crate) fn ensure_european_no_dividend(contract: &Contract, method: &str) -> Result<()> {
    if contract.exercise() != ExerciseStyle::European {
        warn!(method, exercise = %contract.exercise(), "rejecting early-exercise contract");
        return Err(Error::UnsupportedConfiguration(format!(
            "{method} can only price European options, got {}",
            contract.exercise()
        )));
    }
    if contract.pays_dividends() {
        warn!(
            method,
            dividend_yield = contract.dividend_yield(),
            "rejecting dividend-paying contract"
        );
        return Err(Error::UnsupportedConfiguration(format!(
            "{method} does not support a dividend yield (got {})",
            contract.dividend_yield()
        )));
    }
    Ok(())
}

/// Analytic pricing engine for European vanilla options.
///
/// Implements the Black-Scholes-Merton closed-form solution:
///
/// $$C = S N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r \pm \sigma^2/2)T}{\sigma\sqrt{T}}$
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEuropeanEngine;

impl AnalyticEuropeanEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Check `contract` and return its volatility.
    fn prepare(&self, contract: &Contract) -> Result<Volatility> {
        contract.validate()?;
        ensure_european_no_dividend(contract, "Black-Scholes-Merton")?;
        contract.require_volatility()
    }

    /// Greeks of `contract`.
    pub fn greeks(&self, contract: &Contract) -> Result<Greeks> {
        let v = self.prepare(contract)?;
        Ok(black_scholes_greeks(
            contract.side(),
            contract.spot(),
            contract.strike(),
            contract.rate(),
            v,
            contract.maturity(),
        ))
    }

    /// Unscaled vega `∂V/∂σ` of `contract`.
    pub fn vega_unscaled(&self, contract: &Contract) -> Result<Real> {
        let v = self.prepare(contract)?;
        Ok(black_scholes_vega(
            contract.spot(),
            contract.strike(),
            contract.rate(),
            v,
            contract.maturity(),
        ))
    }
}

impl PricingEngine for AnalyticEuropeanEngine {
    type Output = Real;

    fn calculate(&self, contract: &Contract) -> Result<Real> {
        let v = self.prepare(contract)?;
        debug!(side = %contract.side(), volatility = v, "analytic valuation");
        Ok(black_scholes_price(
            contract.side(),
            contract.spot(),
            contract.strike(),
            contract.rate(),
            v,
            contract.maturity(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn contract(side: OptionType) -> Contract {
        Contract::builder(side, 100.0, 100.0, 0.05, 1.0)
            .volatility(0.2)
            .build()
            .unwrap()
    }

    #[test]
    fn bs_call_price() {
        let price = AnalyticEuropeanEngine.calculate(&contract(OptionType::Call)).unwrap();
        assert_abs_diff_eq!(price, 10.4506, epsilon = 1e-4);
    }

    #[test]
    fn bs_put_price() {
        let price = AnalyticEuropeanEngine.calculate(&contract(OptionType::Put)).unwrap();
        assert_abs_diff_eq!(price, 5.5735, epsilon = 1e-4);
    }

    #[test]
    fn put_call_parity() {
        let call = AnalyticEuropeanEngine.calculate(&contract(OptionType::Call)).unwrap();
        let put = AnalyticEuropeanEngine.calculate(&contract(OptionType::Put)).unwrap();
        let parity = 100.0 - 100.0 * (-0.05_f64).exp();
        assert_abs_diff_eq!(call - put, parity, epsilon = 1e-12);
    }

    #[test]
    fn call_greeks() {
        let g = AnalyticEuropeanEngine.greeks(&contract(OptionType::Call)).unwrap();
        assert_abs_diff_eq!(g.delta, 0.636_830_651, epsilon = 1e-8);
        assert_abs_diff_eq!(g.gamma, 0.018_762_017, epsilon = 1e-8);
        assert_abs_diff_eq!(g.vega, 0.375_240_347, epsilon = 1e-8);
        assert_abs_diff_eq!(g.theta, -6.414_027_546 / 365.0, epsilon = 1e-8);
        assert_abs_diff_eq!(g.rho, 0.532_324_815, epsilon = 1e-8);
    }

    #[test]
    fn put_greeks_follow_parity() {
        let c = AnalyticEuropeanEngine.greeks(&contract(OptionType::Call)).unwrap();
        let p = AnalyticEuropeanEngine.greeks(&contract(OptionType::Put)).unwrap();
        let df = (-0.05_f64).exp();
        assert_abs_diff_eq!(c.delta - p.delta, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.gamma, p.gamma, epsilon = 1e-15);
        assert_abs_diff_eq!(c.vega, p.vega, epsilon = 1e-15);
        assert_abs_diff_eq!(p.theta - c.theta, 0.05 * 100.0 * df / 365.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.rho - p.rho, 100.0 * df / 100.0, epsilon = 1e-12);
    }

    #[test]
    fn greeks_match_finite_differences() {
        let (s, k, r, v, t) = (100.0, 95.0, 0.03, 0.25, 0.75);
        let h = 1e-4;
        for side in [OptionType::Call, OptionType::Put] {
            let p = |s: Real, r: Real, v: Real, t: Real| black_scholes_price(side, s, k, r, v, t);
            let g = black_scholes_greeks(side, s, k, r, v, t);
            let delta = (p(s + h, r, v, t) - p(s - h, r, v, t)) / (2.0 * h);
            let gamma = (p(s + h, r, v, t) - 2.0 * p(s, r, v, t) + p(s - h, r, v, t)) / (h * h);
            let vega = (p(s, r, v + h, t) - p(s, r, v - h, t)) / (2.0 * h);
            let rho = (p(s, r + h, v, t) - p(s, r - h, v, t)) / (2.0 * h);
            // theta is the decay as calendar time passes, i.e. −∂V/∂t
            let theta = -(p(s, r, v, t + h) - p(s, r, v, t - h)) / (2.0 * h);
            assert_relative_eq!(g.delta, delta, max_relative = 1e-6);
            assert_relative_eq!(g.gamma, gamma, max_relative = 1e-3);
            assert_relative_eq!(g.vega * VEGA_SCALE, vega, max_relative = 1e-6);
            assert_relative_eq!(g.rho * RHO_SCALE, rho, max_relative = 1e-6);
            assert_relative_eq!(g.theta * DAYS_PER_YEAR, theta, max_relative = 1e-6);
        }
    }

    #[test]
    fn vega_unscaled_is_hundred_times_reported() {
        let c = contract(OptionType::Put);
        let raw = AnalyticEuropeanEngine.vega_unscaled(&c).unwrap();
        let g = AnalyticEuropeanEngine.greeks(&c).unwrap();
        assert_relative_eq!(raw, g.vega * 100.0, max_relative = 1e-14);
    }

    #[test]
    fn deep_itm_call() {
        let c = Contract::builder(OptionType::Call, 200.0, 100.0, 0.05, 1.0)
            .volatility(0.2)
            .build()
            .unwrap();
        let price = AnalyticEuropeanEngine.calculate(&c).unwrap();
        let g = AnalyticEuropeanEngine.greeks(&c).unwrap();
        assert!(price > 100.0, "price = {price}");
        assert!(g.delta > 0.95, "delta = {}", g.delta);
    }

    #[test]
    fn american_is_unsupported() {
        let c = Contract::builder(OptionType::Put, 100.0, 100.0, 0.05, 1.0)
            .volatility(0.2)
            .american()
            .build()
            .unwrap();
        assert!(matches!(
            AnalyticEuropeanEngine.calculate(&c),
            Err(Error::UnsupportedConfiguration(_))
        ));
        assert!(matches!(
            AnalyticEuropeanEngine.greeks(&c),
            Err(Error::UnsupportedConfiguration(_))
        ));
    }

    #[test]
    fn dividend_is_unsupported() {
        let c = Contract::builder(OptionType::Call, 100.0, 100.0, 0.05, 1.0)
            .volatility(0.2)
            .dividend_yield(0.02)
            .build()
            .unwrap();
        assert!(matches!(
            AnalyticEuropeanEngine.calculate(&c),
            Err(Error::UnsupportedConfiguration(_))
        ));
    }

    #[test]
    fn missing_volatility() {
        let c = Contract::builder(OptionType::Call, 100.0, 100.0, 0.05, 1.0)
            .build()
            .unwrap();
        assert!(matches!(
            AnalyticEuropeanEngine.calculate(&c),
            Err(Error::MissingParameter(_))
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn parity_holds(
                s in 20.0..300.0_f64,
                k in 20.0..300.0_f64,
                r in -0.02..0.15_f64,
                v in 0.05..1.0_f64,
                t in 0.05..5.0_f64,
            ) {
                let c = black_scholes_price(OptionType::Call, s, k, r, v, t);
                let p = black_scholes_price(OptionType::Put, s, k, r, v, t);
                prop_assert!((c - p - (s - k * (-r * t).exp())).abs() < 1e-9 * s.max(k));
            }

            #[test]
            fn call_within_no_arbitrage_bounds(
                s in 20.0..300.0_f64,
                k in 20.0..300.0_f64,
                r in 0.0..0.15_f64,
                v in 0.05..1.0_f64,
                t in 0.05..5.0_f64,
            ) {
                let c = black_scholes_price(OptionType::Call, s, k, r, v, t);
                let lower = (s - k * (-r * t).exp()).max(0.0);
                prop_assert!(c >= lower - 1e-9 && c <= s + 1e-9);
                let g = black_scholes_greeks(OptionType::Call, s, k, r, v, t);
                prop_assert!((0.0..=1.0).contains(&g.delta));
                prop_assert!(g.gamma >= 0.0 && g.vega >= 0.0);
            }
        }
    }
}
