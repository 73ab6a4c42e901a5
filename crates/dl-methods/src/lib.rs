//! # dl-methods
//!
//! Numerical methods for pricing on a recombining binomial lattice whose
//! underlying pays discrete cash dividends.
//!
//! # Modules
//!
//! * [`lattice`]: lattice parameters, dividend-yield bucketing, terminal
//!   layer, backward induction and the root-price consistency check

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: parameters, dividend buckets, backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{
    price_with_dividends, roll_back, BinomialTree, DividendYields, LatticeOutcome,
    LatticeParameters, LatticeSettings, NodeValues,
};
