//! `PricingEngine` base trait.
//!
//! An engine holds its own method configuration and values any [`Contract`]
//! handed to it. Engines are pure: they neither mutate the contract nor keep
//! state between calls.

use crate::contract::Contract;
use vp_core::errors::Result;

/// Base trait for all pricing engines.
pub trait PricingEngine: std::fmt::Debug + Send + Sync {
    /// What one valuation returns (a price, or a price plus diagnostics).
    type Output;

    /// Value `contract`.
    fn calculate(&self, contract: &Contract) -> Result<Self::Output>;
}
