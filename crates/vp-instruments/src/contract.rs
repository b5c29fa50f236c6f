//! The vanilla option contract consumed by every pricing engine.
//!
//! A [`Contract`] is a plain parameter bag: side, spot, strike, rate,
//! maturity, an optional volatility, a continuous dividend yield, the
//! exercise style, and an optional observed market price. Construction goes
//! through [`ContractBuilder`], which enforces the positivity invariants.

use crate::exercise::ExerciseStyle;
use crate::payoff::{OptionType, Payoff, PlainVanillaPayoff};
use vp_core::{
    errors::{Error, Result},
    Price, Rate, Real, Time, Volatility,
};

/// One vanilla option contract.
///
/// `dividend_yield` is a continuously-compounded yield, never a discrete
/// cash amount.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contract {
    side: OptionType,
    spot: Real,
    strike: Real,
    rate: Rate,
    maturity: Time,
    volatility: Option<Volatility>,
    dividend_yield: Rate,
    exercise: ExerciseStyle,
    observed_price: Option<Price>,
}

impl Contract {
    /// Start building a contract from its required fields.
    pub fn builder(
        side: OptionType,
        spot: Real,
        strike: Real,
        rate: Rate,
        maturity: Time,
    ) -> ContractBuilder {
        ContractBuilder {
            contract: Contract {
                side,
                spot,
                strike,
                rate,
                maturity,
                volatility: None,
                dividend_yield: 0.0,
                exercise: ExerciseStyle::European,
                observed_price: None,
            },
        }
    }

    /// Call or put.
    pub fn side(&self) -> OptionType {
        self.side
    }

    /// Spot price of the underlying.
    pub fn spot(&self) -> Real {
        self.spot
    }

    /// Strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Continuously-compounded risk-free rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Time to expiry in years.
    pub fn maturity(&self) -> Time {
        self.maturity
    }

    /// Annualised volatility, if set.
    pub fn volatility(&self) -> Option<Volatility> {
        self.volatility
    }

    /// Continuous dividend yield.
    pub fn dividend_yield(&self) -> Rate {
        self.dividend_yield
    }

    /// Exercise style.
    pub fn exercise(&self) -> ExerciseStyle {
        self.exercise
    }

    /// Observed market price, if any.
    pub fn observed_price(&self) -> Option<Price> {
        self.observed_price
    }

    /// Whether the underlying pays a (non-zero) dividend yield.
    pub fn pays_dividends(&self) -> bool {
        self.dividend_yield != 0.0
    }

    /// The volatility, or [`Error::MissingParameter`] when it is unset.
    pub fn require_volatility(&self) -> Result<Volatility> {
        self.volatility.ok_or_else(|| {
            Error::MissingParameter("volatility must be set before pricing".into())
        })
    }

    /// The observed price, or [`Error::MissingParameter`] when it is unset.
    pub fn require_observed_price(&self) -> Result<Price> {
        self.observed_price.ok_or_else(|| {
            Error::MissingParameter("observed price is required for implied volatility".into())
        })
    }

    /// A copy of this contract with `volatility` replaced.
    pub fn with_volatility(&self, volatility: Volatility) -> Result<Self> {
        let mut c = self.clone();
        c.set_volatility(volatility)?;
        Ok(c)
    }

    /// Overwrite the volatility in place (e.g. with a solved implied vol).
    pub fn set_volatility(&mut self, volatility: Volatility) -> Result<()> {
        check_positive("volatility", volatility)?;
        self.volatility = Some(volatility);
        Ok(())
    }

    /// Overwrite the observed market price.
    pub fn set_observed_price(&mut self, price: Price) -> Result<()> {
        check_non_negative("observed price", price)?;
        self.observed_price = Some(price);
        Ok(())
    }

    /// The plain vanilla payoff of this contract.
    pub fn payoff(&self) -> PlainVanillaPayoff {
        PlainVanillaPayoff::new(self.side, self.strike)
    }

    /// Exercise value at underlying price `s`.
    pub fn intrinsic(&self, s: Real) -> Real {
        self.payoff().value(s)
    }

    /// Intrinsic payoff swept over `range_start, range_start + size, …`
    /// strictly below `range_stop`, optionally against another strike.
    pub fn payoff_profile(
        &self,
        range_start: Real,
        range_stop: Real,
        strike_override: Option<Real>,
        size: Real,
    ) -> Result<Vec<Real>> {
        let strike = match strike_override {
            Some(k) => {
                check_positive("strike", k)?;
                k
            }
            None => self.strike,
        };
        PlainVanillaPayoff::new(self.side, strike).profile(range_start, range_stop, size)
    }

    /// Re-check every invariant. Engines call this before valuing.
    pub fn validate(&self) -> Result<()> {
        check_positive("spot", self.spot)?;
        check_positive("strike", self.strike)?;
        check_positive("maturity", self.maturity)?;
        check_finite("rate", self.rate)?;
        check_finite("dividend yield", self.dividend_yield)?;
        if let Some(v) = self.volatility {
            check_positive("volatility", v)?;
        }
        if let Some(p) = self.observed_price {
            check_non_negative("observed price", p)?;
        }
        Ok(())
    }
}

/// Builder for [`Contract`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ContractBuilder {
    contract: Contract,
}

impl ContractBuilder {
    /// Set the volatility.
    pub fn volatility(mut self, volatility: Volatility) -> Self {
        self.contract.volatility = Some(volatility);
        self
    }

    /// Set the continuous dividend yield (default 0).
    pub fn dividend_yield(mut self, dividend_yield: Rate) -> Self {
        self.contract.dividend_yield = dividend_yield;
        self
    }

    /// Set the exercise style (default European).
    pub fn exercise(mut self, exercise: ExerciseStyle) -> Self {
        self.contract.exercise = exercise;
        self
    }

    /// Shorthand for `exercise(ExerciseStyle::American)`.
    pub fn american(self) -> Self {
        self.exercise(ExerciseStyle::American)
    }

    /// Set the observed market price.
    pub fn observed_price(mut self, price: Price) -> Self {
        self.contract.observed_price = Some(price);
        self
    }

    /// Validate and return the contract.
    ///
    /// Fails with [`Error::InvalidArgument`] when spot, strike, maturity,
    /// or a set volatility is not strictly positive, or any field is
    /// non-finite.
    pub fn build(self) -> Result<Contract> {
        self.contract.validate()?;
        Ok(self.contract)
    }
}

fn check_finite(name: &str, x: Real) -> Result<()> {
    if x.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!("{name} must be finite, got {x}")))
    }
}

fn check_positive(name: &str, x: Real) -> Result<()> {
    check_finite(name, x)?;
    if x > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!("{name} must be positive, got {x}")))
    }
}

fn check_non_negative(name: &str, x: Real) -> Result<()> {
    check_finite(name, x)?;
    if x >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!("{name} must be non-negative, got {x}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm_call() -> ContractBuilder {
        Contract::builder(OptionType::Call, 100.0, 100.0, 0.05, 1.0)
    }

    #[test]
    fn builder_defaults() {
        let c = atm_call().build().unwrap();
        assert_eq!(c.side(), OptionType::Call);
        assert_eq!(c.volatility(), None);
        assert_eq!(c.dividend_yield(), 0.0);
        assert_eq!(c.exercise(), ExerciseStyle::European);
        assert_eq!(c.observed_price(), None);
        assert!(!c.pays_dividends());
    }

    #[test]
    fn builder_optional_fields() {
        let c = atm_call()
            .volatility(0.2)
            .dividend_yield(0.01)
            .american()
            .observed_price(12.0)
            .build()
            .unwrap();
        assert_eq!(c.volatility(), Some(0.2));
        assert!(c.pays_dividends());
        assert_eq!(c.exercise(), ExerciseStyle::American);
        assert_eq!(c.require_observed_price().unwrap(), 12.0);
    }

    #[test]
    fn builder_rejects_non_positive_inputs() {
        for (spot, strike, t) in [(0.0, 100.0, 1.0), (100.0, -1.0, 1.0), (100.0, 100.0, 0.0)] {
            let r = Contract::builder(OptionType::Put, spot, strike, 0.05, t).build();
            assert!(matches!(r, Err(Error::InvalidArgument(_))), "{spot} {strike} {t}");
        }
        assert!(atm_call().volatility(0.0).build().is_err());
        assert!(atm_call().volatility(f64::NAN).build().is_err());
    }

    #[test]
    fn negative_rate_is_allowed() {
        let c = Contract::builder(OptionType::Call, 100.0, 100.0, -0.01, 1.0)
            .build()
            .unwrap();
        assert_eq!(c.rate(), -0.01);
    }

    #[test]
    fn missing_volatility_is_reported() {
        let c = atm_call().build().unwrap();
        assert!(matches!(
            c.require_volatility(),
            Err(Error::MissingParameter(_))
        ));
        assert!(matches!(
            c.require_observed_price(),
            Err(Error::MissingParameter(_))
        ));
    }

    #[test]
    fn with_volatility_leaves_original_untouched() {
        let c = atm_call().build().unwrap();
        let priced = c.with_volatility(0.3).unwrap();
        assert_eq!(priced.volatility(), Some(0.3));
        assert_eq!(c.volatility(), None);
        assert!(c.with_volatility(-0.3).is_err());
    }

    #[test]
    fn intrinsic_and_profile() {
        let c = Contract::builder(OptionType::Put, 100.0, 100.0, 0.05, 1.0)
            .build()
            .unwrap();
        assert_eq!(c.intrinsic(80.0), 20.0);
        assert_eq!(
            c.payoff_profile(95.0, 100.0, None, 1.0).unwrap(),
            vec![5.0, 4.0, 3.0, 2.0, 1.0]
        );
        assert_eq!(
            c.payoff_profile(95.0, 100.0, Some(97.0), 2.0).unwrap(),
            vec![2.0, 0.0, 0.0]
        );
        assert!(c.payoff_profile(95.0, 100.0, Some(0.0), 1.0).is_err());
    }
}
