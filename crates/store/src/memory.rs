//! In-memory backend
//!
//! Backs tests and serves as the local cache half of the mirror when no
//! durable store is wanted.

use crate::error::StoreError;
use crate::traits::{
    AccountRepository, AuditRepository, NotificationRepository, RegistrationOutcome,
    TransactionRepository,
};
use chrono::NaiveDate;
use minibank_core::AccountNumber;
use minibank_domain::{
    Account, AlertConfig, AppSettings, AuditEvent, DailyLimits, Notification,
    PendingRegistration, SecurityPolicy, Transaction,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    registrations: Vec<PendingRegistration>,
    balances: HashMap<String, Decimal>,
    limits: HashMap<String, DailyLimits>,
    usage: HashMap<(String, NaiveDate), Decimal>,
    alerts: HashMap<String, AlertConfig>,
    settings: Option<AppSettings>,
    policy: Option<SecurityPolicy>,
    pending: Vec<Transaction>,
    approved: Vec<Transaction>,
    history: HashMap<String, Vec<Transaction>>,
    audit: Vec<AuditEvent>,
    notifications: HashMap<String, Vec<Notification>>,
}

/// Mutex-guarded hash maps keyed the same way the durable backend is.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl AccountRepository for MemoryStore {
    fn save_account(&self, account: &Account) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner
            .accounts
            .insert(account.account_number.to_string(), account.clone());
        Ok(())
    }

    fn find_account(&self, number: &AccountNumber) -> Result<Option<Account>, StoreError> {
        Ok(self.lock()?.accounts.get(number.as_str()).cloned())
    }

    fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .lock()?
            .accounts
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let mut accounts: Vec<Account> = self.lock()?.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.joined_at.cmp(&b.joined_at));
        Ok(accounts)
    }

    fn delete_account(&self, number: &AccountNumber) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if inner.accounts.remove(number.as_str()).is_none() {
            return Err(StoreError::NotFound(number.to_string()));
        }
        inner.balances.remove(number.as_str());
        Ok(())
    }

    fn save_registration(&self, registration: &PendingRegistration) -> Result<(), StoreError> {
        self.lock()?.registrations.push(registration.clone());
        Ok(())
    }

    fn list_registrations(&self) -> Result<Vec<PendingRegistration>, StoreError> {
        Ok(self.lock()?.registrations.clone())
    }

    fn find_registration_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PendingRegistration>, StoreError> {
        Ok(self
            .lock()?
            .registrations
            .iter()
            .find(|r| r.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn remove_registration(
        &self,
        number: &AccountNumber,
        _outcome: RegistrationOutcome,
    ) -> Result<PendingRegistration, StoreError> {
        let mut inner = self.lock()?;
        let position = inner
            .registrations
            .iter()
            .position(|r| r.account_number == *number)
            .ok_or_else(|| StoreError::NotFound(number.to_string()))?;
        Ok(inner.registrations.remove(position))
    }

    fn balance(&self, number: &AccountNumber) -> Result<Decimal, StoreError> {
        Ok(self
            .lock()?
            .balances
            .get(number.as_str())
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    fn set_balance(&self, number: &AccountNumber, balance: Decimal) -> Result<(), StoreError> {
        self.lock()?.balances.insert(number.to_string(), balance);
        Ok(())
    }

    fn limits(&self, number: &AccountNumber) -> Result<DailyLimits, StoreError> {
        Ok(self
            .lock()?
            .limits
            .get(number.as_str())
            .copied()
            .unwrap_or_default())
    }

    fn set_limits(&self, number: &AccountNumber, limits: &DailyLimits) -> Result<(), StoreError> {
        self.lock()?.limits.insert(number.to_string(), *limits);
        Ok(())
    }

    fn usage_on(&self, number: &AccountNumber, day: NaiveDate) -> Result<Decimal, StoreError> {
        Ok(self
            .lock()?
            .usage
            .get(&(number.to_string(), day))
            .copied()
            .unwrap_or(Decimal::ZERO))
    }

    fn add_usage(
        &self,
        number: &AccountNumber,
        day: NaiveDate,
        amount: Decimal,
    ) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let entry = inner
            .usage
            .entry((number.to_string(), day))
            .or_insert(Decimal::ZERO);
        *entry += amount;
        Ok(())
    }

    fn alert_config(&self, number: &AccountNumber) -> Result<AlertConfig, StoreError> {
        Ok(self
            .lock()?
            .alerts
            .get(number.as_str())
            .copied()
            .unwrap_or_default())
    }

    fn set_alert_config(
        &self,
        number: &AccountNumber,
        config: &AlertConfig,
    ) -> Result<(), StoreError> {
        self.lock()?.alerts.insert(number.to_string(), *config);
        Ok(())
    }

    fn settings(&self) -> Result<AppSettings, StoreError> {
        Ok(self.lock()?.settings.clone().unwrap_or_default())
    }

    fn save_settings(&self, settings: &AppSettings) -> Result<(), StoreError> {
        self.lock()?.settings = Some(settings.clone());
        Ok(())
    }

    fn security_policy(&self) -> Result<SecurityPolicy, StoreError> {
        Ok(self.lock()?.policy.unwrap_or_default())
    }

    fn save_security_policy(&self, policy: &SecurityPolicy) -> Result<(), StoreError> {
        self.lock()?.policy = Some(*policy);
        Ok(())
    }
}

impl TransactionRepository for MemoryStore {
    fn push_pending(&self, transaction: &Transaction) -> Result<(), StoreError> {
        self.lock()?.pending.push(transaction.clone());
        Ok(())
    }

    fn pending(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.lock()?.pending.clone())
    }

    fn find_pending(&self, id: Uuid) -> Result<Option<Transaction>, StoreError> {
        Ok(self.lock()?.pending.iter().find(|t| t.id == id).cloned())
    }

    fn remove_pending(&self, id: Uuid) -> Result<Transaction, StoreError> {
        let mut inner = self.lock()?;
        let position = inner
            .pending
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(inner.pending.remove(position))
    }

    fn push_approved(&self, transaction: &Transaction) -> Result<(), StoreError> {
        self.lock()?.approved.push(transaction.clone());
        Ok(())
    }

    fn approved(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.lock()?.approved.clone())
    }

    fn append_history(&self, transaction: &Transaction) -> Result<(), StoreError> {
        self.lock()?
            .history
            .entry(transaction.account_number.to_string())
            .or_default()
            .push(transaction.clone());
        Ok(())
    }

    fn history(&self, number: &AccountNumber) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .lock()?
            .history
            .get(number.as_str())
            .cloned()
            .unwrap_or_default())
    }

    fn update_history(&self, transaction: &Transaction) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let entries = inner
            .history
            .get_mut(transaction.account_number.as_str())
            .ok_or_else(|| StoreError::NotFound(transaction.id.to_string()))?;
        let slot = entries
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or_else(|| StoreError::NotFound(transaction.id.to_string()))?;
        *slot = transaction.clone();
        Ok(())
    }

    fn clear_history(&self, number: &AccountNumber) -> Result<(), StoreError> {
        self.lock()?.history.remove(number.as_str());
        Ok(())
    }
}

impl AuditRepository for MemoryStore {
    fn append_audit(&self, event: &AuditEvent) -> Result<(), StoreError> {
        self.lock()?.audit.push(event.clone());
        Ok(())
    }

    fn recent_audit(&self, limit: usize) -> Result<Vec<AuditEvent>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.audit.iter().rev().take(limit).cloned().collect())
    }

    fn purge_audit(&self) -> Result<usize, StoreError> {
        let mut inner = self.lock()?;
        let count = inner.audit.len();
        inner.audit.clear();
        Ok(count)
    }
}

impl NotificationRepository for MemoryStore {
    fn append_notification(
        &self,
        number: &AccountNumber,
        notification: &Notification,
    ) -> Result<(), StoreError> {
        self.lock()?
            .notifications
            .entry(number.to_string())
            .or_default()
            .push(notification.clone());
        Ok(())
    }

    fn notifications(&self, number: &AccountNumber) -> Result<Vec<Notification>, StoreError> {
        Ok(self
            .lock()?
            .notifications
            .get(number.as_str())
            .cloned()
            .unwrap_or_default())
    }

    fn mark_notification_read(&self, number: &AccountNumber, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let feed = inner
            .notifications
            .get_mut(number.as_str())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let entry = feed
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.read = true;
        Ok(())
    }

    fn clear_notifications(&self, number: &AccountNumber) -> Result<(), StoreError> {
        self.lock()?.notifications.remove(number.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use minibank_core::{Amount, TransactionPin};
    use minibank_domain::{AccountStatus, Role, Severity, TransactionType};
    use rust_decimal_macros::dec;

    fn account(number: &str, email: &str) -> Account {
        Account {
            account_number: AccountNumber::new(number).unwrap(),
            routing_number: None,
            email: email.to_string(),
            name: "Test User".to_string(),
            password: "hunter22".to_string(),
            phone: "5551234567".to_string(),
            pin: TransactionPin::system_assigned(),
            status: AccountStatus::Active,
            role: Role::User,
            joined_at: Utc::now(),
        }
    }

    fn transaction(number: &str) -> Transaction {
        Transaction::new(
            AccountNumber::new(number).unwrap(),
            TransactionType::Deposit,
            Amount::new(dec!(50)).unwrap(),
            "test deposit",
            None,
            None,
        )
    }

    #[test]
    fn test_account_roundtrip_and_email_lookup() {
        let store = MemoryStore::new();
        let a = account("123456789012", "jane@example.com");
        store.save_account(&a).unwrap();

        let by_number = store.find_account(&a.account_number).unwrap().unwrap();
        assert_eq!(by_number.email, "jane@example.com");
        let by_email = store.find_account_by_email("JANE@example.com").unwrap();
        assert!(by_email.is_some());
    }

    #[test]
    fn test_balance_defaults_to_zero() {
        let store = MemoryStore::new();
        let number = AccountNumber::new("123456789012").unwrap();
        assert_eq!(store.balance(&number).unwrap(), Decimal::ZERO);
        store.set_balance(&number, dec!(320.50)).unwrap();
        assert_eq!(store.balance(&number).unwrap(), dec!(320.50));
    }

    #[test]
    fn test_delete_account_removes_balance() {
        let store = MemoryStore::new();
        let a = account("123456789012", "jane@example.com");
        store.save_account(&a).unwrap();
        store.set_balance(&a.account_number, dec!(100)).unwrap();

        store.delete_account(&a.account_number).unwrap();
        assert!(store.find_account(&a.account_number).unwrap().is_none());
        assert_eq!(store.balance(&a.account_number).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_remove_pending_not_found() {
        let store = MemoryStore::new();
        let result = store.remove_pending(Uuid::new_v4());
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_pending_queue_and_history() {
        let store = MemoryStore::new();
        let t = transaction("123456789012");
        store.push_pending(&t).unwrap();
        store.append_history(&t).unwrap();

        assert_eq!(store.pending().unwrap().len(), 1);
        let removed = store.remove_pending(t.id).unwrap();
        assert_eq!(removed.id, t.id);
        assert!(store.pending().unwrap().is_empty());

        let mut decided = t.clone();
        decided.mark_approved(Utc::now());
        store.update_history(&decided).unwrap();
        let history = store.history(&t.account_number).unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].is_terminal());
    }

    #[test]
    fn test_usage_accumulates_per_day() {
        let store = MemoryStore::new();
        let number = AccountNumber::new("123456789012").unwrap();
        let today = Utc::now().date_naive();
        store.add_usage(&number, today, dec!(100)).unwrap();
        store.add_usage(&number, today, dec!(250)).unwrap();
        assert_eq!(store.usage_on(&number, today).unwrap(), dec!(350));

        let other = today.pred_opt().unwrap();
        assert_eq!(store.usage_on(&number, other).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_audit_recent_is_newest_first() {
        let store = MemoryStore::new();
        for i in 0..5 {
            let event = AuditEvent::new(
                minibank_domain::AuditKind::UserFrozen,
                None,
                minibank_domain::AuditTarget::account(format!("{i:012}")),
                serde_json::Value::Null,
            );
            store.append_audit(&event).unwrap();
        }
        let recent = store.recent_audit(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].target.account_number.as_deref(), Some("000000000004"));
        assert_eq!(store.purge_audit().unwrap(), 5);
        assert!(store.recent_audit(10).unwrap().is_empty());
    }

    #[test]
    fn test_notification_feed() {
        let store = MemoryStore::new();
        let number = AccountNumber::new("123456789012").unwrap();
        let n = Notification::new("Deposit approved", "done", Severity::Success);
        store.append_notification(&number, &n).unwrap();

        store.mark_notification_read(&number, n.id).unwrap();
        assert!(store.notifications(&number).unwrap()[0].read);

        store.clear_notifications(&number).unwrap();
        assert!(store.notifications(&number).unwrap().is_empty());
    }
}
