//! Error types for divlattice.
//!
//! Every failure a pricing call can produce is one variant of a single
//! `thiserror`-derived enum. The variants fall into three families:
//!
//! * **input errors**: [`Error::Precondition`], [`Error::InvalidArgument`];
//!   the caller passed something the engine cannot price.
//! * **degenerate parameterizations**: [`Error::DegenerateLattice`]; the
//!   inputs are well-formed but describe a lattice with arbitrage or a
//!   non-positive dividend factor.
//! * **internal failures**: [`Error::Postcondition`], [`Error::Runtime`];
//!   an engine invariant broke, which points at a bug rather than bad input.
//!
//! The `ensure!`, `ensure_post!`, `degenerate!` and `fail!` macros produce the
//! matching variant with an early `return Err(..)`.

use thiserror::Error;

/// The top-level error type used throughout divlattice.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (see [`fail!`](crate::fail)).
    #[error("{0}")]
    Runtime(String),

    /// Input precondition violated (see [`ensure!`](crate::ensure)).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Internal invariant violated (see [`ensure_post!`](crate::ensure_post)).
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// The lattice parameters admit arbitrage or a dividend factor is non-positive.
    #[error("degenerate lattice: {0}")]
    DegenerateLattice(String),

    /// Invalid argument, typically from parsing a textual or loosely typed input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// `true` for errors caused by the caller's inputs.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Precondition(_) | Error::InvalidArgument(_))
    }

    /// `true` for errors that indicate an engine defect.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Postcondition(_) | Error::Runtime(_))
    }
}

/// Shorthand `Result` type used throughout divlattice.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Check an input precondition.
///
/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use dl_core::{ensure, errors::Error};
/// fn positive(x: f64) -> dl_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Check an internal postcondition.
///
/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use dl_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> dl_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result > 0.0, "result must be positive, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(matches!(compute(-1.0), Err(Error::Postcondition(_))));
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Reject a degenerate lattice parameterization.
///
/// Returns `Err(Error::DegenerateLattice(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use dl_core::{degenerate, errors::Error};
/// fn probability(p: f64) -> dl_core::errors::Result<f64> {
///     degenerate!(p > 0.0 && p < 1.0, "p = {p} outside (0, 1)");
///     Ok(p)
/// }
/// assert!(probability(0.5).is_ok());
/// assert!(matches!(probability(1.5), Err(Error::DegenerateLattice(_))));
/// ```
#[macro_export]
macro_rules! degenerate {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::DegenerateLattice(
                format!($($msg)*)
            ));
        }
    };
}

/// Fail immediately with a runtime error.
///
/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use dl_core::{fail, errors::Error};
/// fn always_err() -> dl_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
