//! # dl-math
//!
//! Mathematical utilities: the normal distribution used by the analytic
//! reference engine, floating-point comparisons, and rounding conventions.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison utilities.
pub mod comparison;

/// Probability distributions.
pub mod distributions;

/// Rounding conventions.
pub mod rounding;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::close;
pub use distributions::{normal_cdf, normal_pdf};
pub use rounding::{round, Rounding, RoundingPolicy};
