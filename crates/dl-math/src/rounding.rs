//! Fixed-precision rounding.
//!
//! [`round`] applies a [`Rounding`] convention at a number of decimal places.
//! [`RoundingPolicy`] bundles a convention with its precision so that a
//! pricing call can carry "round every intermediate to N decimals" as an
//! explicit value instead of a module-level constant.

use dl_core::Real;

/// Rounding convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// No rounding; the value is returned unchanged.
    #[default]
    None,
    /// Round to nearest, ties away from zero.
    Closest,
}

/// Round `value` to `precision` decimal places using the given convention.
///
/// Values too large to carry `precision` decimals in an `f64` come back
/// unchanged.
pub fn round(value: Real, precision: i32, convention: Rounding) -> Real {
    match convention {
        Rounding::None => value,
        Rounding::Closest => {
            let mult = 10_f64.powi(precision);
            let scaled = value * mult;
            if scaled.is_finite() {
                scaled.round() / mult
            } else {
                value
            }
        }
    }
}

/// A rounding convention paired with a precision in decimal places.
///
/// The default policy performs no rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundingPolicy {
    /// Convention used when rounding.
    pub convention: Rounding,
    /// Number of decimal places kept.
    pub precision: i32,
}

impl RoundingPolicy {
    /// A policy that leaves every value untouched.
    pub const fn none() -> Self {
        Self {
            convention: Rounding::None,
            precision: 0,
        }
    }

    /// Round to the nearest value with `precision` decimal places.
    pub const fn decimals(precision: i32) -> Self {
        Self {
            convention: Rounding::Closest,
            precision,
        }
    }

    /// Whether this policy changes values at all.
    pub fn is_active(&self) -> bool {
        self.convention != Rounding::None
    }

    /// Apply the policy to `value`.
    #[inline]
    pub fn apply(&self, value: Real) -> Real {
        round(value, self.precision, self.convention)
    }

    /// Largest absolute change a single application can make.
    pub fn quantum(&self) -> Real {
        match self.convention {
            Rounding::None => 0.0,
            Rounding::Closest => 0.5 * 10_f64.powi(-self.precision),
        }
    }
}
