//! Analytic European option engine (Black-Scholes-Merton).
//!
//! Closed-form reference for the lattice engines. It handles a continuous
//! dividend yield but no discrete cash dividends, and European exercise only.

use dl_core::{ensure, errors::Result, Rate, Real, Time, Volatility};
use dl_instruments::{ExerciseType, OptionType, PricingEngine, PricingRequest, PricingResults};
use dl_math::distributions::{normal_cdf, normal_pdf};

/// Analytic pricing engine for European vanilla options.
///
/// $$C = e^{-rT} (F N(d_1) - K N(d_2))$$
/// $$P = e^{-rT} (K N(-d_2) - F N(-d_1))$$
///
/// with forward $F = S e^{(r - q)T}$ and
/// $d_{1,2} = \frac{\ln(F/K)}{\sigma\sqrt{T}} \pm \frac{\sigma\sqrt{T}}{2}$.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEuropeanEngine;

impl AnalyticEuropeanEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

/// Black-Scholes-Merton price of a European option.
///
/// With zero time to expiry the result is the intrinsic value on spot; with
/// zero total volatility it is the discounted intrinsic value on the forward.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Real {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        return (phi * (spot - strike)).max(0.0);
    }

    let df_r = (-risk_free_rate * t).exp();
    let fwd = spot * ((risk_free_rate - dividend_yield) * t).exp();
    let std_dev = volatility * t.sqrt();

    if std_dev <= 1e-15 {
        return df_r * (phi * (fwd - strike)).max(0.0);
    }

    let x = (fwd / strike).ln();
    let d1 = x / std_dev + 0.5 * std_dev;
    let d2 = d1 - std_dev;
    df_r * phi * (fwd * normal_cdf(phi * d1) - strike * normal_cdf(phi * d2))
}

/// Sensitivity of [`black_scholes_merton`] to volatility,
/// `S e^{-qT} φ(d₁) √T`. The same for calls and puts; zero at expiry or with
/// zero total volatility.
pub fn black_scholes_merton_vega(
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Real {
    let t = time_to_expiry;
    let std_dev = volatility * t.max(0.0).sqrt();
    if t <= 0.0 || std_dev <= 1e-15 {
        return 0.0;
    }
    let fwd = spot * ((risk_free_rate - dividend_yield) * t).exp();
    let d1 = (fwd / strike).ln() / std_dev + 0.5 * std_dev;
    spot * (-dividend_yield * t).exp() * normal_pdf(d1) * t.sqrt()
}

impl PricingEngine<PricingRequest> for AnalyticEuropeanEngine {
    fn calculate(&self, args: &PricingRequest) -> Result<PricingResults> {
        args.validate()?;
        ensure!(
            args.exercise == ExerciseType::European,
            "analytic engine prices European exercise only, got {}",
            args.exercise
        );
        let live = args.dividends.in_window(args.time_to_expiry);
        ensure!(
            live.is_empty(),
            "analytic engine cannot price {} discrete dividends before expiry",
            live.len()
        );

        let price = black_scholes_merton(
            args.option_type,
            args.spot,
            args.strike,
            args.rate,
            args.dividend_yield,
            args.volatility,
            args.time_to_expiry,
        );

        let vega = black_scholes_merton_vega(
            args.spot,
            args.strike,
            args.rate,
            args.dividend_yield,
            args.volatility,
            args.time_to_expiry,
        );

        #[cfg(feature = "logging")]
        tracing::debug!(price, vega, option = %args.option_type, "black-scholes-merton");

        Ok(PricingResults::from_npv(price).with_result("vega", vega))
    }
}
