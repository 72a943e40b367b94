//! Transaction record and its pending → approved/declined state machine

use chrono::{DateTime, Utc};
use minibank_core::{AccountNumber, Amount};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Kind of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Transfer,
    Billpay,
}

impl TransactionType {
    /// Transfers and bill payments draw money out; deposits put it in.
    pub fn is_outgoing(&self) -> bool {
        matches!(self, TransactionType::Transfer | TransactionType::Billpay)
    }
}

/// Review status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Declined,
}

/// A transaction moving through admin review.
///
/// While pending it sits in the global pending queue AND the owner's
/// history; after approval it also appears in the approved queue. Declined
/// transactions survive only in the history, carrying the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub account_number: AccountNumber,
    pub kind: TransactionType,
    /// Free-form subtype, e.g. "wire", "zelle", "utilities"
    pub method: Option<String>,
    pub amount: Amount,
    pub description: String,
    /// Type-specific detail bag (recipient, biller, ...)
    pub details: Option<serde_json::Value>,
    pub status: TransactionStatus,
    pub decline_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Set when the transaction reaches approved or declined
    pub decided_at: Option<DateTime<Utc>>,
    /// Id assigned by the remote collection service, when mirrored
    pub remote_id: Option<String>,
}

impl Transaction {
    /// A fresh pending transaction with a generated uuid id.
    pub fn new(
        account_number: AccountNumber,
        kind: TransactionType,
        amount: Amount,
        description: impl Into<String>,
        method: Option<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_number,
            kind,
            method,
            amount,
            description: description.into(),
            details,
            status: TransactionStatus::Pending,
            decline_reason: None,
            created_at: Utc::now(),
            decided_at: None,
            remote_id: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status != TransactionStatus::Pending
    }

    /// Flip to approved. The caller applies the balance delta.
    pub fn mark_approved(&mut self, now: DateTime<Utc>) {
        self.status = TransactionStatus::Approved;
        self.decided_at = Some(now);
    }

    /// Flip to declined with the admin's reason. Balance stays untouched.
    pub fn mark_declined(&mut self, reason: impl Into<String>, now: DateTime<Utc>) {
        self.status = TransactionStatus::Declined;
        self.decline_reason = Some(reason.into());
        self.decided_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn tx(kind: TransactionType) -> Transaction {
        Transaction::new(
            AccountNumber::new("123456789012").unwrap(),
            kind,
            Amount::new(dec!(250)).unwrap(),
            "test",
            None,
            None,
        )
    }

    #[test]
    fn test_new_transaction_is_pending() {
        let t = tx(TransactionType::Deposit);
        assert_eq!(t.status, TransactionStatus::Pending);
        assert!(!t.is_terminal());
        assert!(t.decided_at.is_none());
        assert!(t.decline_reason.is_none());
    }

    #[test]
    fn test_outgoing_classification() {
        assert!(!TransactionType::Deposit.is_outgoing());
        assert!(TransactionType::Transfer.is_outgoing());
        assert!(TransactionType::Billpay.is_outgoing());
    }

    #[test]
    fn test_mark_approved() {
        let mut t = tx(TransactionType::Transfer);
        let now = Utc::now();
        t.mark_approved(now);
        assert_eq!(t.status, TransactionStatus::Approved);
        assert_eq!(t.decided_at, Some(now));
        assert!(t.is_terminal());
    }

    #[test]
    fn test_mark_declined_keeps_reason() {
        let mut t = tx(TransactionType::Billpay);
        t.mark_declined("limit abuse", Utc::now());
        assert_eq!(t.status, TransactionStatus::Declined);
        assert_eq!(t.decline_reason.as_deref(), Some("limit abuse"));
    }

    #[test]
    fn test_type_wire_format() {
        assert_eq!(TransactionType::Billpay.to_string(), "billpay");
        assert_eq!(TransactionType::from_str("deposit").unwrap(), TransactionType::Deposit);
        assert_eq!(TransactionStatus::Declined.to_string(), "declined");
    }

    #[test]
    fn test_unique_ids() {
        let a = tx(TransactionType::Deposit);
        let b = tx(TransactionType::Deposit);
        assert_ne!(a.id, b.id);
    }
}
