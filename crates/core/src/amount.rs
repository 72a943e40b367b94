//! Transaction amount
//!
//! Deposits, transfers and bill payments all move a strictly positive
//! sum; zero and negative values are rejected at construction, so a
//! `Amount` in hand is already a valid transaction amount. Balances are
//! plain `Decimal`s and may be zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Transaction amount must be greater than zero: {0}")]
    NotPositive(Decimal),
}

/// A strictly positive decimal amount.
///
/// # Invariant
/// The inner value is always > 0, enforced by the constructor and by
/// deserialization.
///
/// # Example
/// ```
/// use minibank_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::new(Decimal::new(100, 0)).unwrap();
/// assert_eq!(amount.value(), Decimal::new(100, 0));
///
/// assert!(Amount::new(Decimal::ZERO).is_err());
/// assert!(Amount::new(Decimal::new(-100, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Create a new Amount from a Decimal.
    ///
    /// Returns an error unless the value is strictly positive.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            Err(AmountError::NotPositive(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Get the inner Decimal value
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(dec!(100)).unwrap();
        assert_eq!(amount.value(), dec!(100));
    }

    #[test]
    fn test_amount_zero_rejected() {
        let result = Amount::new(Decimal::ZERO);
        assert!(matches!(result, Err(AmountError::NotPositive(_))));
    }

    #[test]
    fn test_amount_negative_rejected() {
        let result = Amount::new(dec!(-100));
        assert!(matches!(result, Err(AmountError::NotPositive(_))));
    }

    #[test]
    fn test_serde_roundtrip() {
        let amount = Amount::new(dec!(123.45)).unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        let parsed: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, parsed);
    }

    #[test]
    fn test_serde_rejects_non_positive() {
        for raw in ["\"-5.00\"", "\"0\""] {
            let result: Result<Amount, _> = serde_json::from_str(raw);
            assert!(result.is_err(), "accepted {raw}");
        }
    }
}
