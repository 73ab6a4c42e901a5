//! Binomial engine that splits the lattice at every dividend date.
//!
//! Up to the first dividend the stock follows a plain CRR tree. At each node
//! on the dividend date the cash amount is subtracted from the node price and
//! a fresh lattice is started from the ex-dividend price for the remaining
//! life of the option. Cash dividends are handled exactly, at the price of
//! one sub-lattice per node per dividend: with `K` dividends the work is
//! `O(steps^(K+1))`. Latency is bounded only through `steps`; a few hundred
//! steps are enough for one dividend, but with three or more keep `steps`
//! in the tens, or use the bucketed engine.

use dl_core::{errors::Result, Rate, Real, Size, Time, Volatility};
use dl_instruments::{Payoff, PlainVanillaPayoff, PricingEngine, PricingRequest, PricingResults};
use dl_math::RoundingPolicy;
use dl_methods::{roll_back, BinomialTree, LatticeParameters, LatticeSettings};

/// Recursive dividend-splitting binomial engine.
///
/// The continuous dividend yield enters the risk-neutral drift
/// `(R / Y − d) / (u − d)` while discounting stays at the risk-free rate.
#[derive(Debug, Clone, Default)]
pub struct DividendSplitEngine {
    settings: LatticeSettings,
}

/// Market and contract data shared by every level of the recursion.
struct SplitContext<'a> {
    payoff: &'a PlainVanillaPayoff,
    early_exercise: bool,
    volatility: Volatility,
    rate: Rate,
    dividend_yield: Rate,
    rounding: &'a RoundingPolicy,
}

impl DividendSplitEngine {
    /// Engine with explicit numerical settings.
    pub fn new(settings: LatticeSettings) -> Self {
        Self { settings }
    }

    /// Numerical settings in use.
    pub fn settings(&self) -> &LatticeSettings {
        &self.settings
    }
}

impl SplitContext<'_> {
    /// Exercise value with the configured rounding.
    fn intrinsic(&self, s: Real) -> Real {
        self.rounding.apply(self.payoff.value(s))
    }

    fn params(&self, tau: Time, steps: Size) -> Result<LatticeParameters> {
        LatticeParameters::new(
            self.volatility,
            tau,
            steps,
            self.rate - self.dividend_yield,
            0.0,
        )?
        .rounded(self.rounding)
    }

    /// Value at `spot` with `tau` years and `steps` steps left, with the
    /// remaining `dividends` sorted by time and measured from now.
    fn value(&self, spot: Real, tau: Time, steps: Size, dividends: &[(Time, Real)]) -> Result<Real> {
        let params = self.params(tau, steps)?;
        let discount = self.rounding.apply((-self.rate * params.dt).exp());
        let exercise_value = |s: Real| self.intrinsic(s);
        let exercise: Option<&dyn Fn(Real) -> Real> = if self.early_exercise {
            Some(&exercise_value)
        } else {
            None
        };

        let Some((&(t1, amount), rest)) = dividends.split_first() else {
            let tree = BinomialTree::new(spot, steps, &params)?;
            let leaves = tree
                .terminal_underlyings()
                .into_iter()
                .map(|s| self.intrinsic(s))
                .collect();
            return roll_back(&tree, leaves, discount, exercise, self.rounding);
        };

        let before = ((t1 / tau) * steps as Real).floor() as Size;
        let remaining_tau = tau - t1;
        let remaining_steps = steps - before;
        let shifted: Vec<(Time, Real)> = rest.iter().map(|&(t, a)| (t - t1, a)).collect();

        #[cfg(feature = "logging")]
        tracing::trace!(t1, amount, before, remaining_steps, "splitting lattice at dividend");

        let tree = BinomialTree::new(spot, before, &params)?;
        let mut leaves = Vec::with_capacity(tree.size(before));
        for s in tree.terminal_underlyings() {
            let ex_dividend = self.rounding.apply(s - amount);
            let continuation = if ex_dividend > 0.0 {
                self.value(ex_dividend, remaining_tau, remaining_steps, &shifted)?
            } else if self.early_exercise {
                self.intrinsic(0.0)
            } else {
                self.rounding
                    .apply(self.intrinsic(0.0) * (-self.rate * remaining_tau).exp())
            };
            leaves.push(if self.early_exercise {
                continuation.max(self.intrinsic(s))
            } else {
                continuation
            });
        }
        roll_back(&tree, leaves, discount, exercise, self.rounding)
    }
}

impl PricingEngine<PricingRequest> for DividendSplitEngine {
    fn calculate(&self, args: &PricingRequest) -> Result<PricingResults> {
        args.validate()?;
        let payoff = args.payoff();
        let tau = args.time_to_expiry;

        if tau == 0.0 {
            return Ok(PricingResults::from_npv(payoff.value(args.spot))
                .with_result("steps", 0.0)
                .with_result("dividends_applied", 0.0)
                .with_result("dividends_dropped", args.dividends.len() as Real));
        }

        let live: Vec<(Time, Real)> = args
            .dividends
            .in_window(tau)
            .into_iter()
            .map(|d| (d.time, d.amount))
            .collect();

        let ctx = SplitContext {
            payoff: &payoff,
            early_exercise: args.exercise.allows_early_exercise(),
            volatility: args.volatility,
            rate: args.rate,
            dividend_yield: args.dividend_yield,
            rounding: &self.settings.rounding,
        };
        let top = ctx.params(tau, args.steps)?;
        let npv = ctx.value(args.spot, tau, args.steps, &live)?;

        #[cfg(feature = "logging")]
        tracing::debug!(
            exercise = %args.exercise,
            payoff = %payoff,
            npv,
            dividends = live.len(),
            "dividend split engine"
        );

        Ok(PricingResults::from_npv(npv)
            .with_result("steps", args.steps as Real)
            .with_result("dividends_applied", live.len() as Real)
            .with_result("dividends_dropped", (args.dividends.len() - live.len()) as Real)
            .with_result("up_probability", top.p_up))
    }
}
