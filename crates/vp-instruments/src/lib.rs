//! # vp-instruments
//!
//! The vanilla option contract and the pieces it is made of: option type,
//! plain vanilla payoff, exercise style, and the `PricingEngine` seam every
//! valuation method implements.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod contract;
pub mod exercise;
pub mod instrument;
pub mod payoff;

pub use contract::{Contract, ContractBuilder};
pub use exercise::ExerciseStyle;
pub use instrument::PricingEngine;
pub use payoff::{OptionType, Payoff, PlainVanillaPayoff, MAX_PROFILE_POINTS};
