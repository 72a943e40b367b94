//! Account and routing number identifiers
//!
//! Both are stored as plain digit strings. Uniqueness across the store is
//! the registry's responsibility; this module only enforces shape.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing account/routing numbers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("Account number must be exactly 12 digits: {0}")]
    InvalidAccountNumber(String),

    #[error("Routing number must be exactly 9 digits with a non-zero first digit: {0}")]
    InvalidRoutingNumber(String),
}

/// A 12-digit account number.
///
/// # Example
/// ```
/// use minibank_core::AccountNumber;
///
/// let acct: AccountNumber = "123456789012".parse().unwrap();
/// assert_eq!(acct.as_str(), "123456789012");
/// assert!("12345".parse::<AccountNumber>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Parse from a digit string
    pub fn new(digits: impl Into<String>) -> Result<Self, NumberError> {
        let digits = digits.into();
        if digits.len() == 12 && digits.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(digits))
        } else {
            Err(NumberError::InvalidAccountNumber(digits))
        }
    }

    /// Generate a random 12-digit account number.
    ///
    /// Uniqueness against existing accounts is checked by the caller.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let digits: String = (0..12).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect();
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four digits, for masked display
    pub fn last_four(&self) -> &str {
        &self.0[8..]
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = NumberError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AccountNumber> for String {
    fn from(n: AccountNumber) -> Self {
        n.0
    }
}

/// A 9-digit routing number whose first digit is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutingNumber(String);

impl RoutingNumber {
    /// Parse from a digit string
    pub fn new(digits: impl Into<String>) -> Result<Self, NumberError> {
        let digits = digits.into();
        let valid = digits.len() == 9
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0');
        if valid {
            Ok(Self(digits))
        } else {
            Err(NumberError::InvalidRoutingNumber(digits))
        }
    }

    /// Generate a random routing number (first digit forced non-zero).
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut digits = String::with_capacity(9);
        digits.push(char::from(b'1' + rng.gen_range(0..9)));
        for _ in 0..8 {
            digits.push(char::from(b'0' + rng.gen_range(0..10)));
        }
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoutingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoutingNumber {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RoutingNumber {
    type Error = NumberError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RoutingNumber> for String {
    fn from(n: RoutingNumber) -> Self {
        n.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_number_shape() {
        assert!(AccountNumber::new("123456789012").is_ok());
        assert!(AccountNumber::new("12345678901").is_err());
        assert!(AccountNumber::new("1234567890123").is_err());
        assert!(AccountNumber::new("12345678901a").is_err());
    }

    #[test]
    fn test_account_number_generate() {
        let n = AccountNumber::generate();
        assert_eq!(n.as_str().len(), 12);
        assert!(n.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_last_four() {
        let n = AccountNumber::new("123456789012").unwrap();
        assert_eq!(n.last_four(), "9012");
    }

    #[test]
    fn test_routing_number_shape() {
        assert!(RoutingNumber::new("123456789").is_ok());
        assert!(RoutingNumber::new("023456789").is_err());
        assert!(RoutingNumber::new("12345678").is_err());
    }

    #[test]
    fn test_routing_number_generate() {
        for _ in 0..20 {
            let n = RoutingNumber::generate();
            assert_eq!(n.as_str().len(), 9);
            assert_ne!(&n.as_str()[..1], "0");
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let n = AccountNumber::new("123456789012").unwrap();
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "\"123456789012\"");
        let parsed: AccountNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(n, parsed);
    }
}
