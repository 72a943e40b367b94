//! Typed repository traits
//!
//! The registry, workflow engine and console depend on these traits only,
//! never on a concrete backend. Per-account balance, limits, usage and
//! alert thresholds live behind `AccountRepository` keys; the account
//! record itself carries none of them.

use crate::error::StoreError;
use chrono::NaiveDate;
use minibank_core::AccountNumber;
use minibank_domain::{
    Account, AlertConfig, AppSettings, AuditEvent, DailyLimits, Notification,
    PendingRegistration, SecurityPolicy, Transaction,
};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Why a registration left the pending queue. Local backends only record
/// the removal; the mirror uses the outcome to keep the remote copy in step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Approved,
    Rejected { reason: String },
}

/// Accounts, pending registrations and the per-account store keys.
pub trait AccountRepository {
    fn save_account(&self, account: &Account) -> Result<(), StoreError>;
    fn find_account(&self, number: &AccountNumber) -> Result<Option<Account>, StoreError>;
    fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
    fn list_accounts(&self) -> Result<Vec<Account>, StoreError>;
    /// Removes the account record and its balance entry.
    fn delete_account(&self, number: &AccountNumber) -> Result<(), StoreError>;

    fn save_registration(&self, registration: &PendingRegistration) -> Result<(), StoreError>;
    fn list_registrations(&self) -> Result<Vec<PendingRegistration>, StoreError>;
    fn find_registration_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PendingRegistration>, StoreError>;
    fn remove_registration(
        &self,
        number: &AccountNumber,
        outcome: RegistrationOutcome,
    ) -> Result<PendingRegistration, StoreError>;

    /// Authoritative balance; accounts without an entry read as zero.
    fn balance(&self, number: &AccountNumber) -> Result<Decimal, StoreError>;
    fn set_balance(&self, number: &AccountNumber, balance: Decimal) -> Result<(), StoreError>;

    /// Daily caps; accounts without an entry read as the defaults.
    fn limits(&self, number: &AccountNumber) -> Result<DailyLimits, StoreError>;
    fn set_limits(&self, number: &AccountNumber, limits: &DailyLimits) -> Result<(), StoreError>;

    /// Approved transfer+billpay total for a calendar day.
    fn usage_on(&self, number: &AccountNumber, day: NaiveDate) -> Result<Decimal, StoreError>;
    fn add_usage(
        &self,
        number: &AccountNumber,
        day: NaiveDate,
        amount: Decimal,
    ) -> Result<(), StoreError>;

    fn alert_config(&self, number: &AccountNumber) -> Result<AlertConfig, StoreError>;
    fn set_alert_config(
        &self,
        number: &AccountNumber,
        config: &AlertConfig,
    ) -> Result<(), StoreError>;

    fn settings(&self) -> Result<AppSettings, StoreError>;
    fn save_settings(&self, settings: &AppSettings) -> Result<(), StoreError>;
    fn security_policy(&self) -> Result<SecurityPolicy, StoreError>;
    fn save_security_policy(&self, policy: &SecurityPolicy) -> Result<(), StoreError>;
}

/// Pending queue, approved queue and per-account history.
pub trait TransactionRepository {
    fn push_pending(&self, transaction: &Transaction) -> Result<(), StoreError>;
    fn pending(&self) -> Result<Vec<Transaction>, StoreError>;
    fn find_pending(&self, id: Uuid) -> Result<Option<Transaction>, StoreError>;
    /// `NotFound` when the id is not in the queue, including the
    /// already-decided case.
    fn remove_pending(&self, id: Uuid) -> Result<Transaction, StoreError>;

    fn push_approved(&self, transaction: &Transaction) -> Result<(), StoreError>;
    fn approved(&self) -> Result<Vec<Transaction>, StoreError>;

    fn append_history(&self, transaction: &Transaction) -> Result<(), StoreError>;
    fn history(&self, number: &AccountNumber) -> Result<Vec<Transaction>, StoreError>;
    /// Replace the history copy with the same id. `NotFound` if absent.
    fn update_history(&self, transaction: &Transaction) -> Result<(), StoreError>;
    fn clear_history(&self, number: &AccountNumber) -> Result<(), StoreError>;
}

/// Append-only audit trail.
pub trait AuditRepository {
    fn append_audit(&self, event: &AuditEvent) -> Result<(), StoreError>;
    /// Most recent first.
    fn recent_audit(&self, limit: usize) -> Result<Vec<AuditEvent>, StoreError>;
    fn purge_audit(&self) -> Result<usize, StoreError>;
}

/// Per-account notification feeds.
pub trait NotificationRepository {
    fn append_notification(
        &self,
        number: &AccountNumber,
        notification: &Notification,
    ) -> Result<(), StoreError>;
    fn notifications(&self, number: &AccountNumber) -> Result<Vec<Notification>, StoreError>;
    fn mark_notification_read(&self, number: &AccountNumber, id: Uuid) -> Result<(), StoreError>;
    fn clear_notifications(&self, number: &AccountNumber) -> Result<(), StoreError>;
}

/// Everything the higher layers need, in one bound.
pub trait BankStore:
    AccountRepository + TransactionRepository + AuditRepository + NotificationRepository
{
}

impl<T> BankStore for T where
    T: AccountRepository + TransactionRepository + AuditRepository + NotificationRepository
{
}
