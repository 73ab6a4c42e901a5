//! Floating-point comparison.

use dl_core::Real;

/// `true` if `|a − b| <= tolerance`. NaN on either side is never close.
#[inline]
pub fn close(a: Real, b: Real, tolerance: Real) -> bool {
    (a - b).abs() <= tolerance
}
