//! Transaction PIN
//!
//! Registration assigns a random system PIN so the field is never empty,
//! but a PIN only unlocks transactions once the account holder has chosen
//! it themselves (`user_set`). Matching is exact string comparison on the
//! four digits.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from PIN handling
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    #[error("PIN must be exactly 4 digits")]
    InvalidFormat,
}

/// A 4-digit transaction PIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPin {
    digits: String,
    /// True only when the account holder chose the value themselves.
    user_set: bool,
}

impl TransactionPin {
    /// A PIN chosen by the account holder.
    pub fn user_chosen(digits: &str) -> Result<Self, PinError> {
        Self::validate(digits)?;
        Ok(Self {
            digits: digits.to_string(),
            user_set: true,
        })
    }

    /// A placeholder PIN assigned at registration. Does not unlock transactions.
    pub fn system_assigned() -> Self {
        let mut rng = rand::thread_rng();
        let digits = format!("{:04}", rng.gen_range(1000..10000));
        Self {
            digits,
            user_set: false,
        }
    }

    fn validate(digits: &str) -> Result<(), PinError> {
        if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
            Ok(())
        } else {
            Err(PinError::InvalidFormat)
        }
    }

    /// Whether the holder has set this PIN themselves.
    pub fn is_user_set(&self) -> bool {
        self.user_set
    }

    /// Exact match against an entered value.
    pub fn matches(&self, entered: &str) -> bool {
        self.digits == entered
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_chosen_valid() {
        let pin = TransactionPin::user_chosen("1234").unwrap();
        assert!(pin.is_user_set());
        assert!(pin.matches("1234"));
        assert!(!pin.matches("4321"));
    }

    #[test]
    fn test_user_chosen_rejects_bad_shapes() {
        assert!(matches!(TransactionPin::user_chosen("123"), Err(PinError::InvalidFormat)));
        assert!(matches!(TransactionPin::user_chosen("12345"), Err(PinError::InvalidFormat)));
        assert!(matches!(TransactionPin::user_chosen("12a4"), Err(PinError::InvalidFormat)));
    }

    #[test]
    fn test_system_assigned_not_user_set() {
        let pin = TransactionPin::system_assigned();
        assert!(!pin.is_user_set());
        assert_eq!(pin.digits().len(), 4);
        assert!(pin.digits().chars().all(|c| c.is_ascii_digit()));
    }
}
