//! Probability distributions.

pub mod normal;

pub use normal::{normal_cdf, normal_pdf};
