//! # divlattice
//!
//! Binomial-lattice pricing of American and European options on a stock that
//! pays discrete cash dividends.
//!
//! This crate is a **façade** that re-exports the public items of the
//! workspace crates. Application code should depend on this crate rather
//! than the individual `dl-*` crates.
//!
//! ```rust
//! use divlattice::instruments::{ExerciseType, OptionType};
//!
//! // Spot 25, strike 23, 30% vol, 0.64 years, 5% rate, one 0.8 dividend.
//! let call = divlattice::price(
//!     ExerciseType::American,
//!     OptionType::Call,
//!     25.0, 23.0, 0.3, 0.64, 0.05, 0.0,
//!     &[(0.23, 0.8)],
//!     100,
//! )
//! .unwrap();
//! assert!(call > 3.0 && call < 3.7);
//! ```
//!
//! ## Features
//!
//! * `logging` (default): `tracing` events from the lattice and engines.
//!   No subscriber is installed; wire one up in the application.
//! * `serde`: `Serialize`/`Deserialize` for requests, schedules and
//!   settings.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use dl_core as core;

/// Normal distribution, comparisons and rounding.
pub use dl_math as math;

/// Option contracts, dividend schedules and pricing requests.
pub use dl_instruments as instruments;

/// Lattice construction and backward induction.
pub use dl_methods as methods;

/// Pricing engines.
pub use dl_pricingengines as pricingengines;

pub use dl_core::{Error, Result};
pub use dl_pricingengines::price;
