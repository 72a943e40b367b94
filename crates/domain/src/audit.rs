//! Append-only audit trail of admin actions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// What an audit entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    RegistrationApproved,
    RegistrationRejected,
    TransactionApproved,
    TransactionDeclined,
    UserFrozen,
    UserUnfrozen,
    UserDeleted,
    UsersPurged,
    BalanceAdjusted,
}

/// The admin who performed the action, when known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminActor {
    pub name: String,
    pub email: String,
}

/// What the action was aimed at. Any combination of the fields may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTarget {
    pub account_number: Option<String>,
    pub email: Option<String>,
    pub transaction_id: Option<String>,
}

impl AuditTarget {
    pub fn account(account_number: impl Into<String>) -> Self {
        Self {
            account_number: Some(account_number.into()),
            ..Self::default()
        }
    }

    pub fn transaction(transaction_id: impl Into<String>) -> Self {
        Self {
            transaction_id: Some(transaction_id.into()),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_account(mut self, account_number: impl Into<String>) -> Self {
        self.account_number = Some(account_number.into());
        self
    }
}

/// One entry in the audit trail. Entries are never edited; the only way
/// they leave the store is a bulk purge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: Uuid,
    pub kind: AuditKind,
    pub at: DateTime<Utc>,
    pub admin: Option<AdminActor>,
    pub target: AuditTarget,
    /// Kind-specific payload (amount, reason, count, ...)
    pub metadata: serde_json::Value,
}

impl AuditEvent {
    pub fn new(
        kind: AuditKind,
        admin: Option<AdminActor>,
        target: AuditTarget,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            at: Utc::now(),
            admin,
            target,
            metadata,
        }
    }
}
