//! Per-step lattice parameters.
//!
//! Cox-Ross-Rubinstein factors with the dividend yield kept *out* of the
//! risk-neutral measure: the up probability only sees the risk-free growth,
//! and dividends act on node prices instead (see
//! [`DividendYields`](super::DividendYields)).
//!
//! | Symbol | Value |
//! |---|---|
//! | `Δt` | `τ / steps` |
//! | `u` | `exp(σ √Δt)` |
//! | `d` | `1 / u` |
//! | `R` | `exp(r Δt)` |
//! | `Y` | `exp(q Δt)` |
//! | `p_u` | `(R − d) / (u − d)` |
//! | `p_d` | `1 − p_u` |

use dl_core::{degenerate, ensure, Rate, Real, Result, Size, Time, Volatility};
use dl_math::RoundingPolicy;

/// Step size, jump factors, growth and transition probabilities of a
/// recombining binomial lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeParameters {
    /// Time step `Δt`.
    pub dt: Time,
    /// Up factor `u`.
    pub up: Real,
    /// Down factor `d = 1/u`.
    pub down: Real,
    /// Risk-free growth over one step, `R`.
    pub growth: Real,
    /// Continuous dividend decay over one step, `Y`.
    pub yield_decay: Real,
    /// Risk-neutral up probability.
    pub p_up: Real,
    /// Risk-neutral down probability.
    pub p_down: Real,
}

impl LatticeParameters {
    /// Derive the lattice parameters from market inputs.
    ///
    /// # Errors
    /// * precondition error if `steps == 0` or `tau`, `vol`, `div_yield` are
    ///   negative or non-finite;
    /// * [`DegenerateLattice`](dl_core::Error::DegenerateLattice) if `p_u`
    ///   falls outside `(0, 1)`, i.e. `d < R < u` fails. This happens for
    ///   zero volatility, zero time, or a step too coarse for the rate.
    pub fn new(
        vol: Volatility,
        tau: Time,
        steps: Size,
        rate: Rate,
        div_yield: Rate,
    ) -> Result<Self> {
        ensure!(steps >= 1, "lattice needs at least one step");
        ensure!(tau.is_finite() && tau >= 0.0, "tau must be non-negative, got {tau}");
        ensure!(vol.is_finite() && vol >= 0.0, "vol must be non-negative, got {vol}");
        ensure!(rate.is_finite(), "rate must be finite, got {rate}");
        ensure!(
            div_yield.is_finite() && div_yield >= 0.0,
            "dividend yield must be non-negative, got {div_yield}"
        );

        let dt = tau / steps as Real;
        let up = (vol * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = (rate * dt).exp();
        let yield_decay = (div_yield * dt).exp();
        let p_up = (growth - down) / (up - down);

        let params = Self {
            dt,
            up,
            down,
            growth,
            yield_decay,
            p_up,
            p_down: 1.0 - p_up,
        };
        params.check()?;

        #[cfg(feature = "logging")]
        tracing::debug!(steps, dt, up, growth, yield_decay, p_up, "lattice parameters");

        Ok(params)
    }

    /// Reject parameters whose up probability is not strictly inside `(0, 1)`.
    pub fn check(&self) -> Result<()> {
        let p = self.p_up;
        #[cfg(feature = "logging")]
        if !(p > 0.0 && p < 1.0) {
            tracing::warn!(
                p_up = p,
                down = self.down,
                growth = self.growth,
                up = self.up,
                "risk-neutral probability outside (0, 1)"
            );
        }
        degenerate!(
            p > 0.0 && p < 1.0,
            "risk-neutral up probability {p} outside (0, 1): need d < R < u, \
             got d = {}, R = {}, u = {}",
            self.down,
            self.growth,
            self.up
        );
        Ok(())
    }

    /// Per-step discount factor `1/R`.
    #[inline]
    pub fn discount(&self) -> Real {
        1.0 / self.growth
    }

    /// `|u·d − 1|`: zero up to machine precision unless the factors were
    /// rounded.
    #[inline]
    pub fn jump_mismatch(&self) -> Real {
        (self.up * self.down - 1.0).abs()
    }

    /// Apply a rounding policy to every factor, as a fixed-precision
    /// implementation would.
    ///
    /// `d` is recomputed as the rounded reciprocal of the rounded `u`, and
    /// `p_d` from the rounded `p_u` so the probabilities still sum to one.
    /// `u·d` is then one only up to the rounding quantum; see
    /// [`jump_mismatch`](Self::jump_mismatch).
    pub fn rounded(&self, policy: &RoundingPolicy) -> Result<Self> {
        if !policy.is_active() {
            return Ok(*self);
        }
        let up = policy.apply(self.up);
        let p_up = policy.apply(self.p_up);
        let rounded = Self {
            dt: self.dt,
            up,
            down: policy.apply(1.0 / up),
            growth: policy.apply(self.growth),
            yield_decay: policy.apply(self.yield_decay),
            p_up,
            p_down: policy.apply(1.0 - p_up),
        };
        rounded.check()?;
        Ok(rounded)
    }
}
