//! Local + remote mirroring
//!
//! The remote collection service is authoritative when configured. Every
//! write lands in the local backend unconditionally and is then attempted
//! once against the remote; a remote failure is logged and swallowed, never
//! surfaced to the caller. Successful remote reads refresh the local cache
//! ("remote wins"); failed remote reads silently serve local data.

use crate::error::StoreError;
use crate::remote::RemoteStore;
use crate::traits::{
    AccountRepository, AuditRepository, BankStore, NotificationRepository, RegistrationOutcome,
    TransactionRepository,
};
use chrono::NaiveDate;
use minibank_core::AccountNumber;
use minibank_domain::{
    Account, AccountStatus, AlertConfig, AppSettings, AuditEvent, DailyLimits, Notification,
    PendingRegistration, SecurityPolicy, Transaction, TransactionStatus,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

/// A local backend optionally paired with the remote collection service.
/// With no remote configured every call is a plain passthrough.
pub struct MirrorStore<L: BankStore> {
    local: L,
    remote: Option<RemoteStore>,
}

impl<L: BankStore> MirrorStore<L> {
    /// Local-only mode.
    pub fn new(local: L) -> Self {
        Self {
            local,
            remote: None,
        }
    }

    pub fn with_remote(local: L, remote: RemoteStore) -> Self {
        Self {
            local,
            remote: Some(remote),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    fn log_remote_failure(operation: &str, err: &StoreError) {
        warn!(operation, error = %err, "remote write failed, local copy kept");
    }
}

impl<L: BankStore> AccountRepository for MirrorStore<L> {
    fn save_account(&self, account: &Account) -> Result<(), StoreError> {
        let previous = self.local.find_account(&account.account_number)?;
        self.local.save_account(account)?;

        let Some(remote) = &self.remote else {
            return Ok(());
        };
        let result = match previous {
            None => remote.create_account(account),
            Some(prev) if prev.status != account.status => match account.status {
                AccountStatus::Frozen => remote.freeze_account(account.account_number.as_str()),
                AccountStatus::Active if prev.status == AccountStatus::Frozen => {
                    remote.unfreeze_account(account.account_number.as_str())
                }
                _ => Ok(()),
            },
            Some(_) => Ok(()),
        };
        if let Err(err) = result {
            Self::log_remote_failure("save_account", &err);
        }
        Ok(())
    }

    fn find_account(&self, number: &AccountNumber) -> Result<Option<Account>, StoreError> {
        self.local.find_account(number)
    }

    fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        self.local.find_account_by_email(email)
    }

    fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.list_accounts() {
                Ok(accounts) => {
                    // The service omits credentials; keep the local copy's.
                    for account in &accounts {
                        let mut refreshed = account.clone();
                        if refreshed.password.is_empty() {
                            if let Some(local) =
                                self.local.find_account(&refreshed.account_number)?
                            {
                                refreshed.password = local.password;
                            }
                        }
                        self.local.save_account(&refreshed)?;
                    }
                    return self.local.list_accounts();
                }
                Err(err) => {
                    debug!(error = %err, "remote account list unavailable, serving local");
                }
            }
        }
        self.local.list_accounts()
    }

    fn delete_account(&self, number: &AccountNumber) -> Result<(), StoreError> {
        self.local.delete_account(number)?;
        if let Some(remote) = &self.remote {
            if let Err(err) = remote.delete_account(number.as_str()) {
                Self::log_remote_failure("delete_account", &err);
            }
        }
        Ok(())
    }

    fn save_registration(&self, registration: &PendingRegistration) -> Result<(), StoreError> {
        self.local.save_registration(registration)?;
        if let Some(remote) = &self.remote {
            if let Err(err) = remote.create_registration(registration) {
                Self::log_remote_failure("save_registration", &err);
            }
        }
        Ok(())
    }

    fn list_registrations(&self) -> Result<Vec<PendingRegistration>, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.list_registrations() {
                Ok(registrations) => {
                    for registration in &registrations {
                        self.local.save_registration(registration)?;
                    }
                    return Ok(registrations);
                }
                Err(err) => {
                    debug!(error = %err, "remote registration list unavailable, serving local");
                }
            }
        }
        self.local.list_registrations()
    }

    fn find_registration_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PendingRegistration>, StoreError> {
        self.local.find_registration_by_email(email)
    }

    fn remove_registration(
        &self,
        number: &AccountNumber,
        outcome: RegistrationOutcome,
    ) -> Result<PendingRegistration, StoreError> {
        let registration = self.local.remove_registration(number, outcome.clone())?;
        if let Some(remote) = &self.remote {
            let result = match &outcome {
                RegistrationOutcome::Approved => remote.approve_registration(number.as_str()),
                RegistrationOutcome::Rejected { reason } => {
                    remote.reject_registration(number.as_str(), reason)
                }
            };
            if let Err(err) = result {
                Self::log_remote_failure("remove_registration", &err);
            }
        }
        Ok(registration)
    }

    fn balance(&self, number: &AccountNumber) -> Result<Decimal, StoreError> {
        self.local.balance(number)
    }

    fn set_balance(&self, number: &AccountNumber, balance: Decimal) -> Result<(), StoreError> {
        self.local.set_balance(number, balance)
    }

    fn limits(&self, number: &AccountNumber) -> Result<DailyLimits, StoreError> {
        self.local.limits(number)
    }

    fn set_limits(&self, number: &AccountNumber, limits: &DailyLimits) -> Result<(), StoreError> {
        self.local.set_limits(number, limits)
    }

    fn usage_on(&self, number: &AccountNumber, day: NaiveDate) -> Result<Decimal, StoreError> {
        self.local.usage_on(number, day)
    }

    fn add_usage(
        &self,
        number: &AccountNumber,
        day: NaiveDate,
        amount: Decimal,
    ) -> Result<(), StoreError> {
        self.local.add_usage(number, day, amount)
    }

    fn alert_config(&self, number: &AccountNumber) -> Result<AlertConfig, StoreError> {
        self.local.alert_config(number)
    }

    fn set_alert_config(
        &self,
        number: &AccountNumber,
        config: &AlertConfig,
    ) -> Result<(), StoreError> {
        self.local.set_alert_config(number, config)
    }

    fn settings(&self) -> Result<AppSettings, StoreError> {
        self.local.settings()
    }

    fn save_settings(&self, settings: &AppSettings) -> Result<(), StoreError> {
        self.local.save_settings(settings)
    }

    fn security_policy(&self) -> Result<SecurityPolicy, StoreError> {
        self.local.security_policy()
    }

    fn save_security_policy(&self, policy: &SecurityPolicy) -> Result<(), StoreError> {
        self.local.save_security_policy(policy)
    }
}

impl<L: BankStore> TransactionRepository for MirrorStore<L> {
    fn push_pending(&self, transaction: &Transaction) -> Result<(), StoreError> {
        self.local.push_pending(transaction)?;
        let Some(remote) = &self.remote else {
            return Ok(());
        };
        match remote.create_transaction(transaction) {
            Ok(remote_id) => {
                let mut updated = transaction.clone();
                updated.remote_id = Some(remote_id);
                self.local.remove_pending(transaction.id)?;
                self.local.push_pending(&updated)?;
                // History row exists only if the caller appended it first.
                if let Err(err) = self.local.update_history(&updated) {
                    debug!(error = %err, "no history row to carry remote id");
                }
            }
            Err(err) => Self::log_remote_failure("push_pending", &err),
        }
        Ok(())
    }

    fn pending(&self) -> Result<Vec<Transaction>, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.pending_transactions() {
                Ok(transactions) => {
                    // Remote wins: replace the cached queue wholesale.
                    for stale in self.local.pending()? {
                        self.local.remove_pending(stale.id)?;
                    }
                    for transaction in &transactions {
                        self.local.push_pending(transaction)?;
                    }
                    return Ok(transactions);
                }
                Err(err) => {
                    debug!(error = %err, "remote pending queue unavailable, serving local");
                }
            }
        }
        self.local.pending()
    }

    fn find_pending(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        self.local.find_pending(id)
    }

    fn remove_pending(&self, id: Uuid) -> Result<Transaction, StoreError> {
        self.local.remove_pending(id)
    }

    fn push_approved(&self, transaction: &Transaction) -> Result<(), StoreError> {
        self.local.push_approved(transaction)
    }

    fn approved(&self) -> Result<Vec<Transaction>, StoreError> {
        self.local.approved()
    }

    fn append_history(&self, transaction: &Transaction) -> Result<(), StoreError> {
        self.local.append_history(transaction)
    }

    fn history(&self, number: &AccountNumber) -> Result<Vec<Transaction>, StoreError> {
        self.local.history(number)
    }

    fn update_history(&self, transaction: &Transaction) -> Result<(), StoreError> {
        self.local.update_history(transaction)?;
        let Some(remote) = &self.remote else {
            return Ok(());
        };
        let Some(remote_id) = transaction.remote_id.as_deref() else {
            return Ok(());
        };
        let result = match transaction.status {
            TransactionStatus::Approved => remote.approve_transaction(remote_id),
            TransactionStatus::Declined => remote.reject_transaction(
                remote_id,
                transaction.decline_reason.as_deref().unwrap_or_default(),
            ),
            TransactionStatus::Pending => Ok(()),
        };
        if let Err(err) = result {
            Self::log_remote_failure("update_history", &err);
        }
        Ok(())
    }

    fn clear_history(&self, number: &AccountNumber) -> Result<(), StoreError> {
        self.local.clear_history(number)
    }
}

impl<L: BankStore> AuditRepository for MirrorStore<L> {
    fn append_audit(&self, event: &AuditEvent) -> Result<(), StoreError> {
        self.local.append_audit(event)
    }

    fn recent_audit(&self, limit: usize) -> Result<Vec<AuditEvent>, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.recent_audit() {
                Ok(mut events) => {
                    events.truncate(limit);
                    return Ok(events);
                }
                Err(err) => {
                    debug!(error = %err, "remote audit unavailable, serving local");
                }
            }
        }
        self.local.recent_audit(limit)
    }

    fn purge_audit(&self) -> Result<usize, StoreError> {
        self.local.purge_audit()
    }
}

impl<L: BankStore> NotificationRepository for MirrorStore<L> {
    fn append_notification(
        &self,
        number: &AccountNumber,
        notification: &Notification,
    ) -> Result<(), StoreError> {
        self.local.append_notification(number, notification)
    }

    fn notifications(&self, number: &AccountNumber) -> Result<Vec<Notification>, StoreError> {
        self.local.notifications(number)
    }

    fn mark_notification_read(&self, number: &AccountNumber, id: Uuid) -> Result<(), StoreError> {
        self.local.mark_notification_read(number, id)
    }

    fn clear_notifications(&self, number: &AccountNumber) -> Result<(), StoreError> {
        self.local.clear_notifications(number)
    }
}
