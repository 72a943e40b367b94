//! Bank events for pub/sub distribution

use chrono::{DateTime, Utc};
use minibank_core::AccountNumber;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted on state transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BankEvent {
    /// A registration entered the pending queue
    RegistrationSubmitted {
        account_number: AccountNumber,
        email: String,
        timestamp: DateTime<Utc>,
    },

    /// An admin promoted a registration to a live account
    RegistrationApproved {
        account_number: AccountNumber,
        email: String,
        timestamp: DateTime<Utc>,
    },

    /// An admin discarded a registration
    RegistrationRejected {
        email: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// A transaction entered the pending queue
    TransactionSubmitted {
        transaction_id: Uuid,
        account_number: AccountNumber,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// A transaction was approved and its balance delta applied
    TransactionApproved {
        transaction_id: Uuid,
        account_number: AccountNumber,
        amount: Decimal,
        new_balance: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// A transaction was declined; balance untouched
    TransactionRejected {
        transaction_id: Uuid,
        account_number: AccountNumber,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    AccountFrozen {
        account_number: AccountNumber,
        timestamp: DateTime<Utc>,
    },

    AccountUnfrozen {
        account_number: AccountNumber,
        timestamp: DateTime<Utc>,
    },

    AccountDeleted {
        account_number: AccountNumber,
        timestamp: DateTime<Utc>,
    },

    /// An admin adjusted a balance through the audited path
    BalanceAdjusted {
        account_number: AccountNumber,
        amount: Decimal,
        new_balance: Decimal,
        timestamp: DateTime<Utc>,
    },
}

impl BankEvent {
    pub fn transaction_submitted(
        transaction_id: Uuid,
        account_number: AccountNumber,
        amount: Decimal,
    ) -> Self {
        Self::TransactionSubmitted {
            transaction_id,
            account_number,
            amount,
            timestamp: Utc::now(),
        }
    }

    pub fn transaction_approved(
        transaction_id: Uuid,
        account_number: AccountNumber,
        amount: Decimal,
        new_balance: Decimal,
    ) -> Self {
        Self::TransactionApproved {
            transaction_id,
            account_number,
            amount,
            new_balance,
            timestamp: Utc::now(),
        }
    }

    pub fn transaction_rejected(
        transaction_id: Uuid,
        account_number: AccountNumber,
        reason: impl Into<String>,
    ) -> Self {
        Self::TransactionRejected {
            transaction_id,
            account_number,
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }

    /// Short tag for logging
    pub fn kind(&self) -> &'static str {
        match self {
            BankEvent::RegistrationSubmitted { .. } => "registration_submitted",
            BankEvent::RegistrationApproved { .. } => "registration_approved",
            BankEvent::RegistrationRejected { .. } => "registration_rejected",
            BankEvent::TransactionSubmitted { .. } => "transaction_submitted",
            BankEvent::TransactionApproved { .. } => "transaction_approved",
            BankEvent::TransactionRejected { .. } => "transaction_rejected",
            BankEvent::AccountFrozen { .. } => "account_frozen",
            BankEvent::AccountUnfrozen { .. } => "account_unfrozen",
            BankEvent::AccountDeleted { .. } => "account_deleted",
            BankEvent::BalanceAdjusted { .. } => "balance_adjusted",
        }
    }
}
