//! # dl-instruments
//!
//! The contract side of a pricing call: option type and exercise style, the
//! vanilla payoff, the discrete dividend schedule, and the validated
//! [`PricingRequest`] handed to a [`PricingEngine`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dividend;
pub mod exercise;
pub mod instrument;
pub mod option;
pub mod payoff;

pub use dividend::{Dividend, DividendSchedule};
pub use exercise::ExerciseType;
pub use instrument::{PricingEngine, PricingResults};
pub use option::{PricingRequest, PricingRequestBuilder, DEFAULT_STEPS};
pub use payoff::{OptionType, Payoff, PlainVanillaPayoff};
