//! Workflow errors
//!
//! Policy refusals carry the number the caller needs to explain the
//! refusal: remaining daily allowance, available funds.

use minibank_domain::AccountStatus;
use minibank_store::StoreError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from the transaction workflow engine
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Transaction PIN has not been set up")]
    PinNotConfigured,

    #[error("Account is not active (status: {0})")]
    AccountNotActive(AccountStatus),

    #[error("Incorrect transaction PIN")]
    PinMismatch,

    #[error("Daily transfer limit exceeded; {remaining} remaining today")]
    DailyLimitExceeded { remaining: Decimal },

    #[error("Insufficient funds; {available} available")]
    InsufficientFunds { available: Decimal },

    #[error("Transaction not found: {0}")]
    NotFound(String),
}
