//! Dividend-yield buckets.
//!
//! A multiplicative lattice cannot subtract a cash amount at a node without
//! losing recombination. Instead each discrete dividend is turned into a
//! proportional yield at the step nearest its payment time, expressed against
//! the spot already discounted for earlier dividends:
//!
//! ```text
//! yield[t] = Y                                   for every step t
//! t_k      = round(time_k / Δt)                  (half to even)
//! sofar    = Π_{i < t_k} yield[i]
//! yield[t_k] *= 1 + amount_k / (S / sofar)
//! ```
//!
//! Dividends are applied in ascending bucket order so the result does not
//! depend on how the caller ordered the schedule. Several dividends in the
//! same bucket compound. A dividend paid before time zero, at or after
//! expiry, or rounding to the bucket past the last step is dropped.

use dl_core::{degenerate, ensure, Real, Result, Size, Time};

/// Dense per-step dividend factors of a lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct DividendYields {
    factors: Vec<Real>,
    total: Real,
    applied: usize,
    dropped: usize,
}

impl DividendYields {
    /// Bucket `dividends` (as `(time, amount)` pairs) onto a lattice of
    /// `steps` steps of length `dt`, on top of the continuous per-step decay
    /// `yield_decay`.
    ///
    /// # Errors
    /// * precondition error if `steps == 0` or `spot` is not positive;
    /// * [`DegenerateLattice`](dl_core::Error::DegenerateLattice) if a bucket
    ///   factor becomes non-positive, i.e. a negative amount exceeds the
    ///   dividend-discounted spot at its payment date.
    pub fn bucket(
        steps: Size,
        dt: Time,
        yield_decay: Real,
        spot: Real,
        dividends: &[(Time, Real)],
    ) -> Result<Self> {
        ensure!(steps >= 1, "lattice needs at least one step");
        ensure!(spot > 0.0, "spot must be positive, got {spot}");

        let horizon = steps as Real * dt;
        let mut factors = vec![yield_decay; steps];

        let mut buckets: Vec<(usize, Real)> = Vec::with_capacity(dividends.len());
        for &(time, amount) in dividends {
            match bucket_index(time, dt, horizon, steps) {
                Some(t) => buckets.push((t, amount)),
                None => {
                    #[cfg(feature = "logging")]
                    tracing::debug!(time, amount, horizon, "dividend outside lattice, dropped");
                }
            }
        }
        // Stable: equal buckets keep the caller's order.
        buckets.sort_by_key(|&(t, _)| t);

        for &(t, amount) in &buckets {
            let sofar: Real = factors[..t].iter().product();
            let factor = 1.0 + amount / (spot / sofar);
            degenerate!(
                factor > 0.0,
                "dividend of {amount} at step {t} gives non-positive yield factor {factor}"
            );
            factors[t] *= factor;

            #[cfg(feature = "logging")]
            tracing::debug!(step = t, amount, sofar, factor, "dividend bucketed");
        }

        let total = factors.iter().product();
        Ok(Self {
            factors,
            total,
            applied: buckets.len(),
            dropped: dividends.len() - buckets.len(),
        })
    }

    /// Per-step factors; entry `t` applies between steps `t` and `t + 1`.
    pub fn factors(&self) -> &[Real] {
        &self.factors
    }

    /// Factor for step `t`.
    #[inline]
    pub fn factor(&self, t: usize) -> Real {
        self.factors[t]
    }

    /// Product of all factors, the total dividend drag over the lattice.
    pub fn total(&self) -> Real {
        self.total
    }

    /// Number of lattice steps covered.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Whether the lattice has no steps (never true for a bucketed vector).
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Number of dividends that landed in a bucket.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Number of dividends ignored because they fall outside the lattice.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Nearest step for a payment at `time`, or `None` if it cannot affect the
/// lattice.
fn bucket_index(time: Time, dt: Time, horizon: Time, steps: Size) -> Option<usize> {
    if !(time >= 0.0 && time < horizon) {
        return None;
    }
    let t = (time / dt).round_ties_even();
    // `time < horizon` keeps t <= steps; t == steps is still past the last step.
    if t < steps as Real {
        Some(t as usize)
    } else {
        None
    }
}
