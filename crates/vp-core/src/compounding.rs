//! Compounding conventions.

use crate::{DiscountFactor, Rate, Time};

/// How interest is compounded when discounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compounding {
    /// Simple interest: `1 + r·t`
    Simple,
    /// Annually compounded interest: `(1 + r)^t`
    Compounded,
    /// Continuously compounded: `e^(r·t)`
    #[default]
    Continuous,
}

impl Compounding {
    /// Discount factor for `rate` over `t` years under this convention.
    ///
    /// # Example
    /// ```
    /// use vp_core::Compounding;
    /// let df = Compounding::Compounded.discount_factor(0.05, 2.0);
    /// assert!((df - 1.0 / 1.1025).abs() < 1e-12);
    /// ```
    pub fn discount_factor(self, rate: Rate, t: Time) -> DiscountFactor {
        match self {
            Compounding::Simple => 1.0 / (1.0 + rate * t),
            Compounding::Compounded => (1.0 + rate).powf(-t),
            Compounding::Continuous => (-rate * t).exp(),
        }
    }
}
