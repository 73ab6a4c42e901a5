//! Vanilla option payoff.
//!
//! A payoff maps the underlying price at exercise to the holder's cash value.
//! Only the plain vanilla call/put is needed here: `max(φ(S − K), 0)`.

use dl_core::{errors::Error, ensure, Real, Result};
use std::fmt;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Recover the option type from a contract sign (`+1` call, `−1` put).
    pub fn from_sign(sign: Real) -> Result<Self> {
        ensure!(
            sign == 1.0 || sign == -1.0,
            "contract sign must be +1 (call) or -1 (put), got {sign}"
        );
        Ok(if sign > 0.0 {
            OptionType::Call
        } else {
            OptionType::Put
        })
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl std::str::FromStr for OptionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "call" => Ok(OptionType::Call),
            "p" | "put" => Ok(OptionType::Put),
            other => Err(Error::InvalidArgument(format!(
                "unknown option type '{other}' (expected call or put)"
            ))),
        }
    }
}

/// Anything that values the underlying price at exercise.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at exercise/expiry.
    fn value(&self, price: Real) -> Real;
}

/// Standard "plain vanilla" European/American option payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }

    /// Signed exercise value `φ(S − K)` without the floor at zero.
    ///
    /// Early-exercise comparisons use this form; the holder simply never
    /// exercises when it is negative because continuation is non-negative.
    #[inline]
    pub fn exercise_value(&self, price: Real) -> Real {
        self.option_type.sign() * (price - self.strike)
    }
}

impl Payoff for PlainVanillaPayoff {
    #[inline]
    fn value(&self, price: Real) -> Real {
        self.exercise_value(price).max(0.0)
    }
}

impl fmt::Display for PlainVanillaPayoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vanilla {} @ {}", self.option_type, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_payoff() {
        let p = PlainVanillaPayoff::new(OptionType::Call, 23.0);
        assert_eq!(p.value(25.0), 2.0);
        assert_eq!(p.value(20.0), 0.0);
        assert_eq!(p.exercise_value(20.0), -3.0);
    }

    #[test]
    fn put_payoff() {
        let p = PlainVanillaPayoff::new(OptionType::Put, 23.0);
        assert_eq!(p.value(20.0), 3.0);
        assert_eq!(p.value(25.0), 0.0);
    }

    #[test]
    fn sign_round_trip() {
        assert_eq!(OptionType::from_sign(1.0), Ok(OptionType::Call));
        assert_eq!(OptionType::from_sign(-1.0), Ok(OptionType::Put));
        assert!(OptionType::from_sign(0.0).unwrap_err().is_input_error());
        assert!(OptionType::from_sign(f64::NAN).is_err());
    }

    #[test]
    fn parse_option_type() {
        assert_eq!("Call".parse::<OptionType>(), Ok(OptionType::Call));
        assert_eq!(" put ".parse::<OptionType>(), Ok(OptionType::Put));
        assert!(matches!(
            "straddle".parse::<OptionType>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn display() {
        let p = PlainVanillaPayoff::new(OptionType::Put, 25.0);
        assert_eq!(p.to_string(), "Vanilla Put @ 25");
    }
}
