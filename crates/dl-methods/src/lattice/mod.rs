//! Binomial lattice with discrete cash dividends.
//!
//! # Overview
//!
//! * [`LatticeParameters`]: CRR step size, jump factors and probabilities
//! * [`DividendYields`]: cash dividends converted into per-step yields
//! * [`NodeValues`]: terminal layer and in-place backward induction
//! * [`BinomialTree`]: plain recombining tree for piecewise lattices
//! * [`LatticeSettings`]: rounding policy and root-price tolerance
//! * [`price_with_dividends`] / [`roll_back`]: the two pricing drivers

pub mod backward_induction;
pub mod binomial_tree;
pub mod consistency;
pub mod dividend_yield;
pub mod parameters;
pub mod settings;

pub use backward_induction::NodeValues;
pub use binomial_tree::BinomialTree;
pub use consistency::check_root_price;
pub use dividend_yield::DividendYields;
pub use parameters::LatticeParameters;
pub use settings::LatticeSettings;

use dl_core::{ensure, ensure_post, fail, DiscountFactor, Price, Real, Result, Size, Time};

// ─── Outcome ──────────────────────────────────────────────────────────────────

/// Value and diagnostics of one dividend-adjusted lattice evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeOutcome {
    /// Option value at the root.
    pub value: Price,
    /// Underlying price reconstructed at the root; equals spot up to the
    /// settings' tolerance.
    pub root_price: Price,
    /// Product of all per-step yield factors.
    pub total_dividend_drag: Real,
    /// Dividends that landed in a lattice bucket.
    pub dividends_applied: usize,
    /// Dividends outside the lattice horizon.
    pub dividends_dropped: usize,
    /// Up probability actually used (after rounding).
    pub p_up: Real,
}

// ─── Drivers ──────────────────────────────────────────────────────────────────

/// Price on a single recombining lattice whose cash dividends are bucketed
/// into per-step yields.
///
/// `payoff` gives the exercise value at a node price and is used both for the
/// terminal layer and, when `early_exercise` is set, at every interior node.
/// `params` should already be rounded with `settings.rounding`.
///
/// # Errors
/// * precondition error for `steps == 0` or a non-positive spot;
/// * [`DegenerateLattice`](dl_core::Error::DegenerateLattice) if a dividend
///   bucket factor is non-positive;
/// * postcondition error if the reconstructed root price drifts from spot;
/// * runtime error if the payoff drives the root value to NaN or `±∞`.
pub fn price_with_dividends(
    spot: Real,
    params: &LatticeParameters,
    steps: Size,
    dividends: &[(Time, Real)],
    payoff: &dyn Fn(Real) -> Real,
    early_exercise: bool,
    settings: &LatticeSettings,
) -> Result<LatticeOutcome> {
    let rounding = &settings.rounding;
    let yields = DividendYields::bucket(steps, params.dt, params.yield_decay, spot, dividends)?;

    let mut nodes = NodeValues::terminal(spot, params, yields.total(), steps, payoff, rounding);
    let exercise = if early_exercise { Some(payoff) } else { None };
    nodes.roll_back(params, &yields, exercise, rounding)?;
    let (root_price, value) = nodes.root()?;
    if !value.is_finite() {
        fail!("lattice produced a non-finite option value {value} after {steps} steps");
    }

    let tolerance = settings.root_tolerance_for(spot, params, steps, yields.applied());
    check_root_price(root_price, spot, tolerance)?;

    #[cfg(feature = "logging")]
    tracing::debug!(
        steps,
        value,
        root_price,
        drag = yields.total(),
        applied = yields.applied(),
        dropped = yields.dropped(),
        "lattice priced"
    );

    Ok(LatticeOutcome {
        value,
        root_price,
        total_dividend_drag: yields.total(),
        dividends_applied: yields.applied(),
        dividends_dropped: yields.dropped(),
        p_up: params.p_up,
    })
}

/// Roll caller-supplied terminal values back to the root of `tree`.
///
/// `terminal` must hold one value per node at the tree's last step. Each step
/// discounts the expectation by `discount`; with `exercise`, every interior
/// node is floored at `exercise(underlying)`. Terminal values are taken as
/// given, so any early-exercise floor there is the caller's business.
///
/// # Errors
/// Precondition error if `terminal` does not match the tree's last layer.
pub fn roll_back(
    tree: &BinomialTree,
    terminal: Vec<Real>,
    discount: DiscountFactor,
    exercise: Option<&dyn Fn(Real) -> Real>,
    rounding: &dl_math::RoundingPolicy,
) -> Result<Real> {
    let n = tree.steps();
    ensure!(
        terminal.len() == tree.size(n),
        "expected {} terminal values, got {}",
        tree.size(n),
        terminal.len()
    );

    let mut values = terminal;
    for i in (0..n).rev() {
        for j in 0..tree.size(i) {
            let up = tree.probability(i, j, 1) * values[tree.descendant(i, j, 1)];
            let down = tree.probability(i, j, 0) * values[tree.descendant(i, j, 0)];
            let hold = rounding.apply(discount * (up + down));
            values[j] = match exercise {
                Some(exercise) => hold.max(rounding.apply(exercise(tree.underlying(i, j)))),
                None => hold,
            };
        }
        values.truncate(tree.size(i));
    }
    ensure_post!(values.len() == 1, "roll-back left {} root values", values.len());
    Ok(values[0])
}

// ─── Tests ────────────────────────────────────────────────────────────────────
