//! Numerical settings threaded through a pricing call.

use dl_core::{Real, Size};
use dl_math::RoundingPolicy;

use super::LatticeParameters;

/// Knobs that change how a lattice is evaluated, not what it prices.
///
/// There is no global copy of these settings: every engine owns one and
/// passes it down explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LatticeSettings {
    /// Rounding applied to lattice parameters and to every node value.
    pub rounding: RoundingPolicy,
    /// Relative drift allowed per step when the root price is compared with
    /// the spot after backward induction.
    pub root_tolerance: Real,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            rounding: RoundingPolicy::none(),
            root_tolerance: 1e-10,
        }
    }
}

impl LatticeSettings {
    /// Settings that round every intermediate value to `precision` decimals.
    pub fn with_rounding(precision: i32) -> Self {
        Self {
            rounding: RoundingPolicy::decimals(precision),
            ..Self::default()
        }
    }

    /// Absolute tolerance on the reconstructed root price.
    ///
    /// Grows linearly with the number of steps and dividends. With rounding
    /// active it also covers `steps` roundings of prices up to `u` times
    /// spot, and the drift `|u·d − 1|` that rounded factors leave on every
    /// step.
    pub fn root_tolerance_for(
        &self,
        spot: Real,
        params: &LatticeParameters,
        steps: Size,
        dividends: usize,
    ) -> Real {
        let scale = spot.abs().max(1.0);
        let n = steps as Real;
        let per_step = self.root_tolerance * (n + dividends as Real + 1.0);
        let rounding = 3.0 * self.rounding.quantum() * n * params.up.max(1.0);
        let jumps = n * params.jump_mismatch();
        scale * (per_step + rounding + jumps)
    }
}
