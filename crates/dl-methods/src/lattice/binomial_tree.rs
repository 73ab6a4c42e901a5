//! Recombining multiplicative binomial tree.
//!
//! Node `(i, j)` sits at step `i` after `j` up-moves and `i − j` down-moves,
//! with underlying value `x0 · exp((i−j) ln d + j ln u)`, clamped like the
//! dividend lattice's node prices. Unlike the dividend-adjusted
//! lattice in [`backward_induction`](super::backward_induction), this tree
//! carries no dividend drag: it is the building block for pricing a lattice
//! piecewise between dividend dates.

use dl_core::{ensure, Real, Result, Size};

use super::backward_induction::bounded;
use super::LatticeParameters;

/// A recombining binomial tree with constant up/down factors and
/// probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialTree {
    x0: Real,
    steps: Size,
    ln_up: Real,
    ln_down: Real,
    pu: Real,
    pd: Real,
}

impl BinomialTree {
    /// Tree of `steps` steps rooted at `x0`, using the jump factors and
    /// probabilities of `params`.
    ///
    /// `steps` may be zero, in which case the tree is its root alone.
    pub fn new(x0: Real, steps: Size, params: &LatticeParameters) -> Result<Self> {
        ensure!(x0.is_finite() && x0 > 0.0, "tree root must be positive and finite, got {x0}");
        Ok(Self {
            x0,
            steps,
            ln_up: params.up.ln(),
            ln_down: params.down.ln(),
            pu: params.p_up,
            pd: params.p_down,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Root value.
    pub fn x0(&self) -> Real {
        self.x0
    }

    /// Number of nodes at step `i`.
    pub fn size(&self, i: Size) -> Size {
        i + 1
    }

    /// Index of the descendant at step `i + 1`; `branch = 0` is down,
    /// `branch = 1` is up.
    pub fn descendant(&self, _i: Size, index: Size, branch: usize) -> Size {
        index + branch
    }

    /// Underlying value at node `(i, index)`.
    pub fn underlying(&self, i: Size, index: Size) -> Real {
        let exponent = (i - index) as Real * self.ln_down + index as Real * self.ln_up;
        bounded(self.x0 * exponent.exp())
    }

    /// Transition probability of `branch` (0 = down, 1 = up).
    pub fn probability(&self, _i: Size, _index: Size, branch: usize) -> Real {
        if branch == 1 {
            self.pu
        } else {
            self.pd
        }
    }

    /// Underlying values at the last step, lowest first.
    pub fn terminal_underlyings(&self) -> Vec<Real> {
        (0..self.size(self.steps))
            .map(|j| self.underlying(self.steps, j))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::backward_induction::{PRICE_CEILING, PRICE_FLOOR};
    use approx::assert_abs_diff_eq;

    fn params() -> LatticeParameters {
        LatticeParameters::new(0.2, 1.0, 100, 0.05, 0.0).unwrap()
    }

    #[test]
    fn recombines() {
        let p = params();
        let tree = BinomialTree::new(100.0, 10, &p).unwrap();
        // up then down lands where down then up does: both are node (2, 1).
        assert_abs_diff_eq!(tree.underlying(2, 1), 100.0, epsilon = 1e-12);
        assert_eq!(tree.descendant(1, 0, 1), tree.descendant(1, 1, 0));
        assert_eq!(tree.size(10), 11);
    }

    #[test]
    fn probabilities_follow_parameters() {
        let p = params();
        let tree = BinomialTree::new(100.0, 5, &p).unwrap();
        assert_eq!(tree.probability(0, 0, 1), p.p_up);
        assert_eq!(tree.probability(3, 2, 0), p.p_down);
    }

    #[test]
    fn zero_step_tree_is_its_root() {
        let tree = BinomialTree::new(42.0, 0, &params()).unwrap();
        assert_eq!(tree.terminal_underlyings(), vec![42.0]);
    }

    #[test]
    fn terminal_layer_spans_up_and_down_extremes() {
        let p = params();
        let tree = BinomialTree::new(50.0, 4, &p).unwrap();
        let leaves = tree.terminal_underlyings();
        assert_eq!(leaves.len(), 5);
        assert_abs_diff_eq!(leaves[0], 50.0 * p.down.powi(4), epsilon = 1e-12);
        assert_abs_diff_eq!(leaves[4], 50.0 * p.up.powi(4), epsilon = 1e-12);
    }

    #[test]
    fn non_finite_or_non_positive_root_is_rejected() {
        assert!(BinomialTree::new(Real::NAN, 3, &params()).is_err());
        assert!(BinomialTree::new(0.0, 3, &params()).unwrap_err().is_input_error());
    }

    #[test]
    fn extreme_nodes_saturate_instead_of_overflowing() {
        let p = LatticeParameters::new(5.0, 10.0, 3000, 0.05, 0.0).unwrap();
        let tree = BinomialTree::new(25.0, 3000, &p).unwrap();
        let leaves = tree.terminal_underlyings();
        assert_eq!(leaves[0], PRICE_FLOOR);
        assert_eq!(leaves[3000], PRICE_CEILING);
        assert!(leaves.windows(2).all(|w| w[0] <= w[1]));
        assert_abs_diff_eq!(tree.underlying(3000, 1500), 25.0, epsilon = 1e-9);
    }
}
