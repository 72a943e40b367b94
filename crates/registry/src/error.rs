//! Registry errors

use chrono::{DateTime, Utc};
use minibank_core::PinError;
use minibank_domain::{AccountStatus, ValidationError};
use minibank_store::StoreError;
use thiserror::Error;

/// Errors from account registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Pin(#[from] PinError),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Too many failed attempts; locked until {until}")]
    LockedOut { until: DateTime<Utc> },

    #[error("{0}")]
    Maintenance(String),

    #[error("Account cannot log in while {0}")]
    LoginBlocked(AccountStatus),

    #[error("Admin accounts cannot be {0}")]
    AdminProtected(&'static str),

    #[error("Current PIN does not match")]
    CurrentPinMismatch,

    #[error("PIN confirmation does not match")]
    PinConfirmMismatch,
}
