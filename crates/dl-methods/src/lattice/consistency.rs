//! Root-price self-check.
//!
//! Dividing the dividend drag out of the terminal layer and multiplying it
//! back in during the roll-back must land the root price on the spot. A
//! mismatch means the bucketing and the induction disagree, which is an
//! internal fault rather than a bad input.

use dl_core::{ensure_post, Real};
use dl_math::close;

/// Check that the reconstructed root price agrees with `spot` within the
/// absolute `tolerance`.
///
/// # Errors
/// Returns a postcondition error naming both values on mismatch.
pub fn check_root_price(root_price: Real, spot: Real, tolerance: Real) -> dl_core::Result<()> {
    let ok = close(root_price, spot, tolerance);
    #[cfg(feature = "logging")]
    if !ok {
        tracing::error!(root_price, spot, tolerance, "root price does not reproduce spot");
    }
    ensure_post!(
        ok,
        "lattice root price {root_price} does not reproduce spot {spot} (tolerance {tolerance:e})"
    );
    Ok(())
}
