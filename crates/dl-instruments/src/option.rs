//! Pricing request for a vanilla equity option with discrete dividends.
//!
//! [`PricingRequest`] bundles the contract (style, type, strike), the market
//! (spot, volatility, rate, continuous yield, dividend schedule) and the
//! lattice resolution. It is a plain value: engines borrow it and never keep
//! it past a single call.

use crate::dividend::DividendSchedule;
use crate::exercise::ExerciseType;
use crate::payoff::{OptionType, PlainVanillaPayoff};
use dl_core::{ensure, Rate, Real, Result, Size, Time, Volatility};

/// Lattice resolution used when the caller does not choose one.
pub const DEFAULT_STEPS: Size = 1000;

/// Everything an engine needs to price one option.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingRequest {
    /// American or European exercise.
    pub exercise: ExerciseType,
    /// Call or put.
    pub option_type: OptionType,
    /// Current price of the underlying.
    pub spot: Real,
    /// Strike price.
    pub strike: Real,
    /// Annualised volatility.
    pub volatility: Volatility,
    /// Time to expiry in years.
    pub time_to_expiry: Time,
    /// Continuously compounded risk-free rate.
    pub rate: Rate,
    /// Continuously compounded dividend yield.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend_yield: Rate,
    /// Discrete cash dividends.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividends: DividendSchedule,
    /// Number of lattice steps.
    pub steps: Size,
}

impl PricingRequest {
    /// Start building a request; see [`PricingRequestBuilder`].
    pub fn builder(
        exercise: ExerciseType,
        option_type: OptionType,
        spot: Real,
        strike: Real,
    ) -> PricingRequestBuilder {
        PricingRequestBuilder {
            request: PricingRequest {
                exercise,
                option_type,
                spot,
                strike,
                volatility: 0.0,
                time_to_expiry: 0.0,
                rate: 0.0,
                dividend_yield: 0.0,
                dividends: DividendSchedule::new(),
                steps: DEFAULT_STEPS,
            },
        }
    }

    /// The vanilla payoff of this contract.
    pub fn payoff(&self) -> PlainVanillaPayoff {
        PlainVanillaPayoff::new(self.option_type, self.strike)
    }

    /// Check every scalar input.
    ///
    /// # Errors
    /// Returns a precondition error for non-positive spot or strike, negative
    /// volatility, time or dividend yield, zero steps, or any non-finite
    /// value (including dividend times and amounts).
    pub fn validate(&self) -> Result<()> {
        ensure!(self.steps >= 1, "steps must be at least 1, got {}", self.steps);
        ensure!(
            self.spot.is_finite() && self.spot > 0.0,
            "spot must be positive and finite, got {}",
            self.spot
        );
        ensure!(
            self.strike.is_finite() && self.strike > 0.0,
            "strike must be positive and finite, got {}",
            self.strike
        );
        ensure!(
            self.volatility.is_finite() && self.volatility >= 0.0,
            "volatility must be non-negative and finite, got {}",
            self.volatility
        );
        ensure!(
            self.time_to_expiry.is_finite() && self.time_to_expiry >= 0.0,
            "time to expiry must be non-negative and finite, got {}",
            self.time_to_expiry
        );
        ensure!(self.rate.is_finite(), "rate must be finite, got {}", self.rate);
        ensure!(
            self.dividend_yield.is_finite() && self.dividend_yield >= 0.0,
            "dividend yield must be non-negative and finite, got {}",
            self.dividend_yield
        );
        for (i, d) in self.dividends.iter().enumerate() {
            ensure!(
                d.time.is_finite() && d.amount.is_finite(),
                "dividend {i} must have finite time and amount, got ({}, {})",
                d.time,
                d.amount
            );
        }
        Ok(())
    }
}

/// Fluent constructor for [`PricingRequest`].
///
/// Unset fields default to zero volatility, time, rate and yield, an empty
/// dividend schedule, and [`DEFAULT_STEPS`] steps.
///
/// ```
/// use dl_instruments::{ExerciseType, OptionType, PricingRequest};
///
/// let request = PricingRequest::builder(ExerciseType::American, OptionType::Put, 25.0, 23.0)
///     .volatility(0.3)
///     .time_to_expiry(0.64)
///     .rate(0.05)
///     .dividend(0.23, 0.8)
///     .steps(100)
///     .build()
///     .unwrap();
/// assert_eq!(request.dividends.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PricingRequestBuilder {
    request: PricingRequest,
}

impl PricingRequestBuilder {
    /// Annualised volatility.
    pub fn volatility(mut self, volatility: Volatility) -> Self {
        self.request.volatility = volatility;
        self
    }

    /// Time to expiry in years.
    pub fn time_to_expiry(mut self, tau: Time) -> Self {
        self.request.time_to_expiry = tau;
        self
    }

    /// Continuously compounded risk-free rate.
    pub fn rate(mut self, rate: Rate) -> Self {
        self.request.rate = rate;
        self
    }

    /// Continuously compounded dividend yield.
    pub fn dividend_yield(mut self, q: Rate) -> Self {
        self.request.dividend_yield = q;
        self
    }

    /// Add one discrete dividend.
    pub fn dividend(mut self, time: Time, amount: Real) -> Self {
        self.request.dividends = self.request.dividends.with(time, amount);
        self
    }

    /// Replace the whole dividend schedule.
    pub fn dividends(mut self, schedule: impl Into<DividendSchedule>) -> Self {
        self.request.dividends = schedule.into();
        self
    }

    /// Number of lattice steps.
    pub fn steps(mut self, steps: Size) -> Self {
        self.request.steps = steps;
        self
    }

    /// Validate and return the request.
    pub fn build(self) -> Result<PricingRequest> {
        self.request.validate()?;
        Ok(self.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PricingRequestBuilder {
        PricingRequest::builder(ExerciseType::American, OptionType::Call, 25.0, 23.0)
            .volatility(0.3)
            .time_to_expiry(0.25)
            .rate(0.05)
            .steps(100)
    }

    #[test]
    fn builder_defaults() {
        let r = PricingRequest::builder(ExerciseType::European, OptionType::Put, 100.0, 95.0)
            .build()
            .unwrap();
        assert_eq!(r.steps, DEFAULT_STEPS);
        assert_eq!(r.dividend_yield, 0.0);
        assert!(r.dividends.is_empty());
    }

    #[test]
    fn payoff_matches_contract() {
        let r = base().build().unwrap();
        assert_eq!(r.payoff(), PlainVanillaPayoff::new(OptionType::Call, 23.0));
    }

    #[test]
    fn rejects_bad_scalars() {
        assert!(base().steps(0).build().unwrap_err().is_input_error());
        assert!(base().volatility(-0.1).build().is_err());
        assert!(base().time_to_expiry(-1.0).build().is_err());
        assert!(base().dividend_yield(-0.01).build().is_err());
        assert!(base().rate(f64::NAN).build().is_err());
        assert!(base().dividend(f64::INFINITY, 1.0).build().is_err());

        let mut r = base().build().unwrap();
        r.spot = -25.0;
        assert!(r.validate().is_err());
        r.spot = 25.0;
        r.strike = 0.0;
        assert!(r.validate().is_err());
    }

    #[test]
    fn zero_volatility_and_time_are_valid_inputs() {
        assert!(base().volatility(0.0).build().is_ok());
        assert!(base().time_to_expiry(0.0).build().is_ok());
    }

    #[test]
    fn dividends_outside_horizon_are_accepted() {
        let r = base().dividend(5.0, 1.0).dividend(-0.5, 1.0).build().unwrap();
        assert_eq!(r.dividends.len(), 2);
        assert!(r.dividends.in_window(r.time_to_expiry).is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip_fills_defaults() {
        let json = r#"{
            "exercise": "American", "option_type": "Put",
            "spot": 25.0, "strike": 23.0, "volatility": 0.3,
            "time_to_expiry": 0.64, "rate": 0.05, "steps": 100,
            "dividends": [{"time": 0.23, "amount": 0.8}]
        }"#;
        let r: PricingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(r.dividend_yield, 0.0);
        assert_eq!(r.dividends.len(), 1);
        r.validate().unwrap();
    }
}
