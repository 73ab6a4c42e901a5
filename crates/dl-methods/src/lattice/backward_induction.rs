//! Terminal layer and backward induction on the dividend-adjusted lattice.
//!
//! The lattice moves only by `u` and `d`, so it recombines. Dividends are
//! taken out of the terminal prices in one go (division by the total drag)
//! and put back step by step while rolling back: at step `t` a node price is
//! its down child's times `u · yield[t]`, or its up child's times
//! `d · yield[t]`. Nodes below the centre line take the up child and the rest
//! the down child, so the root price is rebuilt along the centre of the
//! lattice and never from its extreme, possibly saturated, nodes.
//!
//! Terminal prices are evaluated as `exp(ln S + i ln u + (N − i) ln d)` and
//! kept inside `[PRICE_FLOOR, PRICE_CEILING]`, so a long, volatile lattice
//! does not overflow to `∞` or underflow to zero at its edges.
//!
//! Both sequences live in flat buffers sized `steps + 1` and shrink by one
//! node per step. Node `i` at step `t` only reads nodes `i` and `i + 1` of
//! step `t + 1`, so an in-place ascending sweep never reads a value it has
//! already overwritten.

use dl_core::{ensure_post, Real, Size};
use dl_math::RoundingPolicy;

use super::{DividendYields, LatticeParameters};

/// Largest node price the lattice carries.
pub const PRICE_CEILING: Real = 1e300;

/// Smallest node price the lattice carries.
pub const PRICE_FLOOR: Real = 1e-300;

/// Clamp a node price to [`PRICE_FLOOR`, `PRICE_CEILING`].
#[inline]
pub(crate) fn bounded(price: Real) -> Real {
    price.clamp(PRICE_FLOOR, PRICE_CEILING)
}

/// Underlying prices and option values of one lattice layer, lowest price
/// first.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeValues {
    prices: Vec<Real>,
    values: Vec<Real>,
}

impl NodeValues {
    /// Seed the terminal layer of a `steps`-step lattice.
    ///
    /// `price[i] = spot · u^i · d^(steps − i) / total_drag`, evaluated in log
    /// space and clamped to [`PRICE_FLOOR`, `PRICE_CEILING`], and
    /// `value[i] = payoff(price[i])`.
    pub fn terminal(
        spot: Real,
        params: &LatticeParameters,
        total_drag: Real,
        steps: Size,
        payoff: &dyn Fn(Real) -> Real,
        rounding: &RoundingPolicy,
    ) -> Self {
        let (ln_up, ln_down) = (params.up.ln(), params.down.ln());
        let ln_base = spot.ln() - total_drag.ln();
        let prices: Vec<Real> = (0..=steps)
            .map(|i| {
                let ln_price = ln_base + i as Real * ln_up + (steps - i) as Real * ln_down;
                rounding.apply(bounded(ln_price.exp()))
            })
            .collect();
        let values = prices.iter().map(|&s| rounding.apply(payoff(s))).collect();
        Self { prices, values }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether no node is left.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Underlying prices, lowest first.
    pub fn prices(&self) -> &[Real] {
        &self.prices
    }

    /// Option values aligned with [`prices`](Self::prices).
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// Walk the lattice from its last step back to the valuation date.
    ///
    /// At step `t` (from `steps − 1` down to 0), for every surviving node:
    /// 1. `price[i] ← price[i + 1] · d · yield[t]` below the centre line
    ///    (`2i < t`), otherwise `price[i] ← price[i] · u · yield[t]`
    /// 2. `value[i] ← (value[i] · p_d + value[i+1] · p_u) / R`
    /// 3. with `exercise`, `value[i] ← max(value[i], exercise(price[i]))`
    ///
    /// # Errors
    /// Returns a postcondition error if the price and value sequences ever
    /// disagree in length, or if the yield vector does not cover every step.
    pub fn roll_back(
        &mut self,
        params: &LatticeParameters,
        yields: &DividendYields,
        exercise: Option<&dyn Fn(Real) -> Real>,
        rounding: &RoundingPolicy,
    ) -> dl_core::Result<()> {
        ensure_post!(
            self.prices.len() == self.values.len(),
            "price ({}) and value ({}) layers differ in length",
            self.prices.len(),
            self.values.len()
        );
        let steps = self.prices.len().saturating_sub(1);
        ensure_post!(
            yields.len() == steps,
            "yield vector covers {} steps, lattice has {steps}",
            yields.len()
        );

        let (up, down) = (params.up, params.down);
        let (p_up, p_down, growth) = (params.p_up, params.p_down, params.growth);
        for t in (0..steps).rev() {
            let y = yields.factor(t);
            for i in 0..=t {
                let price = if 2 * i < t {
                    self.prices[i + 1] * down * y
                } else {
                    self.prices[i] * up * y
                };
                self.prices[i] = rounding.apply(bounded(price));
                let hold = rounding.apply((self.values[i] * p_down + self.values[i + 1] * p_up) / growth);
                self.values[i] = match exercise {
                    Some(exercise) => hold.max(rounding.apply(exercise(self.prices[i]))),
                    None => hold,
                };
            }
            self.prices.truncate(t + 1);
            self.values.truncate(t + 1);
        }
        Ok(())
    }

    /// The single remaining `(price, value)` pair after a full roll-back.
    ///
    /// # Errors
    /// Returns a postcondition error unless exactly one node of each kind is
    /// left.
    pub fn root(&self) -> dl_core::Result<(Real, Real)> {
        ensure_post!(
            self.prices.len() == 1 && self.values.len() == 1,
            "expected a single root node, found {} prices and {} values",
            self.prices.len(),
            self.values.len()
        );
        Ok((self.prices[0], self.values[0]))
    }
}
