//! Binomial engine for vanilla options with discrete cash dividends.
//!
//! Each cash dividend becomes a proportional yield at the lattice step
//! nearest its payment date, so the lattice recombines no matter how many
//! dividends are scheduled. The work is `O(steps²)` time and `O(steps)`
//! memory regardless of the dividend count.

use dl_core::{errors::Result, Rate, Real, Size, Time, Volatility};
use dl_instruments::{
    DividendSchedule, ExerciseType, OptionType, Payoff, PricingEngine, PricingRequest,
    PricingResults,
};
use dl_methods::{price_with_dividends, LatticeParameters, LatticeSettings};

/// Bucketed-dividend binomial engine.
///
/// ```
/// use dl_instruments::{ExerciseType, OptionType, PricingEngine, PricingRequest};
/// use dl_pricingengines::BinomialDividendEngine;
///
/// let request = PricingRequest::builder(ExerciseType::American, OptionType::Call, 25.0, 23.0)
///     .volatility(0.3)
///     .time_to_expiry(0.64)
///     .rate(0.05)
///     .dividend(0.23, 0.8)
///     .steps(100)
///     .build()
///     .unwrap();
/// let results = BinomialDividendEngine::default().calculate(&request).unwrap();
/// assert!(results.npv > 2.0);
/// assert_eq!(results.result("dividends_applied"), Some(1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BinomialDividendEngine {
    settings: LatticeSettings,
}

impl BinomialDividendEngine {
    /// Engine with explicit numerical settings.
    pub fn new(settings: LatticeSettings) -> Self {
        Self { settings }
    }

    /// Numerical settings in use.
    pub fn settings(&self) -> &LatticeSettings {
        &self.settings
    }
}

impl PricingEngine<PricingRequest> for BinomialDividendEngine {
    fn calculate(&self, args: &PricingRequest) -> Result<PricingResults> {
        args.validate()?;
        let payoff = args.payoff();

        if args.time_to_expiry == 0.0 {
            let intrinsic = payoff.value(args.spot);
            #[cfg(feature = "logging")]
            tracing::debug!(intrinsic, "expired contract, no lattice built");
            return Ok(PricingResults::from_npv(intrinsic)
                .with_result("root_price", args.spot)
                .with_result("total_dividend_drag", 1.0)
                .with_result("steps", 0.0)
                .with_result("dividends_applied", 0.0)
                .with_result("dividends_dropped", args.dividends.len() as Real));
        }

        let params = LatticeParameters::new(
            args.volatility,
            args.time_to_expiry,
            args.steps,
            args.rate,
            args.dividend_yield,
        )?
        .rounded(&self.settings.rounding)?;

        let value_at = |s: Real| payoff.value(s);
        let outcome = price_with_dividends(
            args.spot,
            &params,
            args.steps,
            &args.dividends.as_pairs(),
            &value_at,
            args.exercise.allows_early_exercise(),
            &self.settings,
        )?;

        #[cfg(feature = "logging")]
        tracing::debug!(
            exercise = %args.exercise,
            payoff = %payoff,
            npv = outcome.value,
            steps = args.steps,
            "binomial dividend engine"
        );

        Ok(PricingResults::from_npv(outcome.value)
            .with_result("root_price", outcome.root_price)
            .with_result("total_dividend_drag", outcome.total_dividend_drag)
            .with_result("steps", args.steps as Real)
            .with_result("dividends_applied", outcome.dividends_applied as Real)
            .with_result("dividends_dropped", outcome.dividends_dropped as Real)
            .with_result("up_probability", outcome.p_up))
    }
}

/// Price one option with default settings on the bucketed lattice.
///
/// `dividends` are `(time, amount)` pairs in years from today; entries
/// outside `[0, time_to_expiry)` are ignored.
///
/// ```
/// use dl_instruments::{ExerciseType, OptionType};
///
/// let put = dl_pricingengines::price(
///     ExerciseType::American,
///     OptionType::Put,
///     25.0, 25.0, 0.3, 0.5, 0.05, 0.0,
///     &[(0.25, 0.8)],
///     200,
/// )
/// .unwrap();
/// assert!(put > 0.0);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn price(
    exercise: ExerciseType,
    option_type: OptionType,
    spot: Real,
    strike: Real,
    volatility: Volatility,
    time_to_expiry: Time,
    rate: Rate,
    dividend_yield: Rate,
    dividends: &[(Time, Real)],
    steps: Size,
) -> Result<Real> {
    let request = PricingRequest::builder(exercise, option_type, spot, strike)
        .volatility(volatility)
        .time_to_expiry(time_to_expiry)
        .rate(rate)
        .dividend_yield(dividend_yield)
        .dividends(DividendSchedule::from(dividends))
        .steps(steps)
        .build()?;
    Ok(BinomialDividendEngine::default().calculate(&request)?.npv)
}
