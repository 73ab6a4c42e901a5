//! # dl-pricingengines
//!
//! Pricing engines for vanilla options on a stock paying discrete cash
//! dividends.
//!
//! ## Engines
//!
//! - [`BinomialDividendEngine`]: recombining lattice with dividends bucketed
//!   into per-step yields
//! - [`DividendSplitEngine`]: lattice split at each dividend date, with the
//!   cash amount taken out of every node price
//! - [`AnalyticEuropeanEngine`]: Black-Scholes-Merton closed form, used as a
//!   reference when there are no discrete dividends
//!
//! [`price`] is a one-call shortcut to the bucketed engine with default
//! settings.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_dividend_engine;
pub mod dividend_split_engine;

pub use analytic_european_engine::{
    black_scholes_merton, black_scholes_merton_vega, AnalyticEuropeanEngine,
};
pub use binomial_dividend_engine::{price, BinomialDividendEngine};
pub use dividend_split_engine::DividendSplitEngine;
