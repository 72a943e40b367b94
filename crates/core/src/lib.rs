//! Minibank Core - Value types
//!
//! This crate contains the fundamental types used across Minibank:
//! - `Amount`: Strictly positive decimal wrapper for transaction amounts
//! - `AccountNumber`: 12-digit account identifier
//! - `RoutingNumber`: 9-digit routing identifier (first digit non-zero)
//! - `TransactionPin`: 4-digit PIN with user-set tracking

pub mod amount;
pub mod number;
pub mod pin;

pub use amount::{Amount, AmountError};
pub use number::{AccountNumber, NumberError, RoutingNumber};
pub use pin::{PinError, TransactionPin};
