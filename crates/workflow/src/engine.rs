//! Transaction workflow engine
//!
//! The only path that mutates balances. Create runs the policy gates in a
//! fixed order (PIN configured, account active, PIN match, daily limit,
//! funds); Approve applies the balance delta and fans out audit,
//! notifications, usage accounting and a bus event; Reject flips the
//! history copy and touches nothing else.

use crate::error::WorkflowError;
use chrono::Utc;
use minibank_bus::{BankEvent, EventBus};
use minibank_core::{AccountNumber, Amount};
use minibank_domain::{
    Account, AccountStatus, AdminActor, AuditEvent, AuditKind, AuditTarget, Notification,
    Severity, Transaction, TransactionType,
};
use minibank_store::{BankStore, StoreError};
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Input for `create`.
#[derive(Debug, Clone)]
pub struct TransactionRequest {
    pub account_number: AccountNumber,
    pub kind: TransactionType,
    pub amount: Amount,
    pub description: String,
    pub method: Option<String>,
    pub details: Option<serde_json::Value>,
    pub entered_pin: String,
}

pub struct TransactionWorkflow<S: BankStore> {
    store: Arc<S>,
    bus: EventBus,
}

impl<S: BankStore> TransactionWorkflow<S> {
    pub fn new(store: Arc<S>, bus: EventBus) -> Self {
        Self { store, bus }
    }

    /// Submit a transaction for review.
    ///
    /// Gate order matters: PIN setup, account status, PIN match, daily
    /// limit (outgoing only; landing exactly on the limit is accepted),
    /// funds net of other pending outgoing amounts.
    pub fn create(&self, request: TransactionRequest) -> Result<Transaction, WorkflowError> {
        let account = self.account(&request.account_number)?;

        if !account.pin.is_user_set() {
            return Err(WorkflowError::PinNotConfigured);
        }
        if account.status != AccountStatus::Active {
            return Err(WorkflowError::AccountNotActive(account.status));
        }
        if !account.pin.matches(&request.entered_pin) {
            return Err(WorkflowError::PinMismatch);
        }

        let amount = request.amount.value();
        if request.kind.is_outgoing() {
            let limit = self.store.limits(&request.account_number)?.transfer;
            let used = self
                .store
                .usage_on(&request.account_number, Utc::now().date_naive())?;
            if used + amount > limit {
                return Err(WorkflowError::DailyLimitExceeded {
                    remaining: (limit - used).max(Decimal::ZERO),
                });
            }

            let balance = self.store.balance(&request.account_number)?;
            let committed: Decimal = self
                .store
                .pending()?
                .iter()
                .filter(|t| {
                    t.account_number == request.account_number && t.kind.is_outgoing()
                })
                .map(|t| t.amount.value())
                .sum();
            let available = balance - committed;
            if amount > available {
                return Err(WorkflowError::InsufficientFunds { available });
            }
        }

        let transaction = Transaction::new(
            request.account_number.clone(),
            request.kind,
            request.amount,
            request.description,
            request.method,
            request.details,
        );
        // History first so a mirroring store can attach the remote id to it.
        self.store.append_history(&transaction)?;
        self.store.push_pending(&transaction)?;

        info!(id = %transaction.id, kind = %transaction.kind, "transaction submitted");
        self.bus.publish(BankEvent::transaction_submitted(
            transaction.id,
            transaction.account_number.clone(),
            amount,
        ));

        // The stored copy may carry a remote id the local one lacks.
        Ok(self
            .store
            .find_pending(transaction.id)?
            .unwrap_or(transaction))
    }

    /// Approve a pending transaction: apply the balance delta, flip the
    /// history copy, enter the approved queue, audit, notify, record
    /// daily usage for outgoing kinds.
    ///
    /// A second approve of the same id finds nothing in the queue and
    /// returns `NotFound`; the balance is never applied twice.
    pub fn approve(
        &self,
        id: Uuid,
        admin: Option<AdminActor>,
    ) -> Result<Transaction, WorkflowError> {
        let mut transaction = self.take_pending(id)?;
        let now = Utc::now();
        let amount = transaction.amount.value();

        let balance = self.store.balance(&transaction.account_number)?;
        let new_balance = if transaction.kind.is_outgoing() {
            balance - amount
        } else {
            balance + amount
        };
        self.store
            .set_balance(&transaction.account_number, new_balance)?;

        transaction.mark_approved(now);
        self.store.update_history(&transaction)?;
        self.store.push_approved(&transaction)?;

        if transaction.kind.is_outgoing() {
            self.store
                .add_usage(&transaction.account_number, now.date_naive(), amount)?;
        }

        self.store.append_audit(&AuditEvent::new(
            AuditKind::TransactionApproved,
            admin,
            AuditTarget::transaction(transaction.id.to_string())
                .with_account(transaction.account_number.as_str()),
            json!({ "type": transaction.kind, "amount": amount }),
        ))?;
        self.notify_approved(&transaction, new_balance)?;

        info!(id = %transaction.id, %new_balance, "transaction approved");
        self.bus.publish(BankEvent::transaction_approved(
            transaction.id,
            transaction.account_number.clone(),
            amount,
            new_balance,
        ));
        Ok(transaction)
    }

    /// Decline a pending transaction. The balance is untouched and the
    /// record survives only in the owner's history, with the reason.
    pub fn reject(
        &self,
        id: Uuid,
        reason: &str,
        admin: Option<AdminActor>,
    ) -> Result<Transaction, WorkflowError> {
        let mut transaction = self.take_pending(id)?;
        transaction.mark_declined(reason, Utc::now());
        self.store.update_history(&transaction)?;

        self.store.append_audit(&AuditEvent::new(
            AuditKind::TransactionDeclined,
            admin,
            AuditTarget::transaction(transaction.id.to_string())
                .with_account(transaction.account_number.as_str()),
            json!({ "type": transaction.kind, "amount": transaction.amount, "reason": reason }),
        ))?;
        self.store.append_notification(
            &transaction.account_number,
            &Notification::new(
                "Transaction declined",
                format!(
                    "Your {} of ${} was declined: {}",
                    transaction.kind, transaction.amount, reason
                ),
                Severity::Error,
            ),
        )?;

        info!(id = %transaction.id, reason, "transaction declined");
        self.bus.publish(BankEvent::transaction_rejected(
            transaction.id,
            transaction.account_number.clone(),
            reason,
        ));
        Ok(transaction)
    }

    /// Admin balance adjustment: an auto-approved credit that still leaves
    /// a transaction record, an audit entry and a notification. There is
    /// no mutation path that skips these.
    pub fn adjust_balance(
        &self,
        number: &AccountNumber,
        amount: Amount,
        note: &str,
        admin: Option<AdminActor>,
    ) -> Result<Transaction, WorkflowError> {
        self.account(number)?;
        let now = Utc::now();

        let mut transaction = Transaction::new(
            number.clone(),
            TransactionType::Deposit,
            amount,
            note,
            Some("adjustment".to_string()),
            None,
        );
        transaction.mark_approved(now);
        self.store.append_history(&transaction)?;
        self.store.push_approved(&transaction)?;

        let new_balance = self.store.balance(number)? + amount.value();
        self.store.set_balance(number, new_balance)?;

        self.store.append_audit(&AuditEvent::new(
            AuditKind::BalanceAdjusted,
            admin,
            AuditTarget::transaction(transaction.id.to_string()).with_account(number.as_str()),
            json!({ "amount": amount, "note": note }),
        ))?;
        self.store.append_notification(
            number,
            &Notification::new(
                "Balance adjusted",
                format!("An adjustment of ${amount} was credited to your account."),
                Severity::Info,
            ),
        )?;

        info!(account = %number, %amount, "balance adjusted");
        self.bus.publish(BankEvent::BalanceAdjusted {
            account_number: number.clone(),
            amount: amount.value(),
            new_balance,
            timestamp: now,
        });
        Ok(transaction)
    }

    fn notify_approved(
        &self,
        transaction: &Transaction,
        new_balance: Decimal,
    ) -> Result<(), WorkflowError> {
        self.store.append_notification(
            &transaction.account_number,
            &Notification::new(
                "Transaction approved",
                format!(
                    "Your {} of ${} was approved.",
                    transaction.kind, transaction.amount
                ),
                Severity::Success,
            ),
        )?;

        let alerts = self.store.alert_config(&transaction.account_number)?;
        if new_balance <= alerts.low_balance_threshold {
            self.store.append_notification(
                &transaction.account_number,
                &Notification::new(
                    "Low balance",
                    format!("Your balance has fallen to ${new_balance}."),
                    Severity::Warning,
                ),
            )?;
        }
        if transaction.amount.value() >= alerts.large_transaction_threshold {
            self.store.append_notification(
                &transaction.account_number,
                &Notification::new(
                    "Large transaction",
                    format!("A transaction of ${} posted to your account.", transaction.amount),
                    Severity::Info,
                ),
            )?;
        }
        Ok(())
    }

    fn account(&self, number: &AccountNumber) -> Result<Account, WorkflowError> {
        self.store
            .find_account(number)?
            .ok_or_else(|| WorkflowError::AccountNotFound(number.to_string()))
    }

    fn take_pending(&self, id: Uuid) -> Result<Transaction, WorkflowError> {
        match self.store.remove_pending(id) {
            Ok(transaction) => Ok(transaction),
            Err(StoreError::NotFound(what)) => Err(WorkflowError::NotFound(what)),
            Err(other) => Err(WorkflowError::Store(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minibank_core::TransactionPin;
    use minibank_domain::{AlertConfig, DailyLimits, Role, TransactionStatus};
    use minibank_store::{
        AccountRepository, AuditRepository, MemoryStore, NotificationRepository,
        TransactionRepository,
    };
    use rust_decimal_macros::dec;

    fn setup() -> (TransactionWorkflow<MemoryStore>, Arc<MemoryStore>, AccountNumber) {
        let store = Arc::new(MemoryStore::new());
        let number = AccountNumber::new("123456789012").unwrap();
        let account = Account {
            account_number: number.clone(),
            routing_number: None,
            email: "jane@example.com".to_string(),
            name: "Jane Doe".to_string(),
            password: "hunter22".to_string(),
            phone: "5551234567".to_string(),
            pin: TransactionPin::user_chosen("4321").unwrap(),
            status: AccountStatus::Active,
            role: Role::User,
            joined_at: Utc::now(),
        };
        store.save_account(&account).unwrap();
        store.set_balance(&number, dec!(1000)).unwrap();
        store.set_limits(&number, &DailyLimits::default()).unwrap();
        let workflow = TransactionWorkflow::new(store.clone(), EventBus::new());
        (workflow, store, number)
    }

    fn request(number: &AccountNumber, kind: TransactionType, amount: Decimal) -> TransactionRequest {
        TransactionRequest {
            account_number: number.clone(),
            kind,
            amount: Amount::new(amount).unwrap(),
            description: "test".to_string(),
            method: None,
            details: None,
            entered_pin: "4321".to_string(),
        }
    }

    #[test]
    fn test_create_requires_user_set_pin() {
        let (workflow, store, number) = setup();
        let mut account = store.find_account(&number).unwrap().unwrap();
        account.pin = TransactionPin::system_assigned();
        store.save_account(&account).unwrap();

        let err = workflow
            .create(request(&number, TransactionType::Deposit, dec!(100)))
            .unwrap_err();
        assert!(matches!(err, WorkflowError::PinNotConfigured));
        assert!(store.pending().unwrap().is_empty());
        assert!(store.history(&number).unwrap().is_empty());
        assert_eq!(store.balance(&number).unwrap(), dec!(1000));
    }

    #[test]
    fn test_create_requires_active_account() {
        let (workflow, store, number) = setup();
        let mut account = store.find_account(&number).unwrap().unwrap();
        account.status = AccountStatus::Frozen;
        store.save_account(&account).unwrap();

        assert!(matches!(
            workflow.create(request(&number, TransactionType::Deposit, dec!(100))),
            Err(WorkflowError::AccountNotActive(AccountStatus::Frozen))
        ));
    }

    #[test]
    fn test_create_rejects_wrong_pin() {
        let (workflow, store, number) = setup();
        let mut bad = request(&number, TransactionType::Deposit, dec!(100));
        bad.entered_pin = "0000".to_string();
        assert!(matches!(
            workflow.create(bad),
            Err(WorkflowError::PinMismatch)
        ));
        assert!(store.pending().unwrap().is_empty());
    }

    #[test]
    fn test_create_lands_in_queue_and_history() {
        let (workflow, store, number) = setup();
        let t = workflow
            .create(request(&number, TransactionType::Deposit, dec!(100)))
            .unwrap();

        assert_eq!(t.status, TransactionStatus::Pending);
        assert_eq!(store.pending().unwrap().len(), 1);
        assert_eq!(store.history(&number).unwrap().len(), 1);
        // No notification until a terminal transition.
        assert!(store.notifications(&number).unwrap().is_empty());
        // Balance only moves on approval.
        assert_eq!(store.balance(&number).unwrap(), dec!(1000));
    }

    #[test]
    fn test_daily_limit_boundary() {
        let (workflow, store, number) = setup();
        store
            .set_limits(&number, &DailyLimits { atm: dec!(500), transfer: dec!(500) })
            .unwrap();

        // Landing exactly on the limit is accepted.
        let t = workflow
            .create(request(&number, TransactionType::Transfer, dec!(500)))
            .unwrap();
        workflow.approve(t.id, None).unwrap();

        let err = workflow
            .create(request(&number, TransactionType::Transfer, dec!(0.01)))
            .unwrap_err();
        match err {
            WorkflowError::DailyLimitExceeded { remaining } => {
                assert_eq!(remaining, dec!(0.00));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_limit_counts_approved_only() {
        let (workflow, _, number) = setup();
        // A pending transfer of 2500 does not consume the daily allowance.
        workflow
            .create(request(&number, TransactionType::Transfer, dec!(600)))
            .unwrap();
        workflow
            .create(request(&number, TransactionType::Transfer, dec!(400)))
            .unwrap();
    }

    #[test]
    fn test_insufficient_funds_counts_pending_outgoing() {
        let (workflow, _, number) = setup();
        workflow
            .create(request(&number, TransactionType::Transfer, dec!(800)))
            .unwrap();

        let err = workflow
            .create(request(&number, TransactionType::Billpay, dec!(300)))
            .unwrap_err();
        match err {
            WorkflowError::InsufficientFunds { available } => {
                assert_eq!(available, dec!(200));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Deposits are never funds-checked.
        workflow
            .create(request(&number, TransactionType::Deposit, dec!(5000)))
            .unwrap();
    }

    #[test]
    fn test_approve_deposit_adds() {
        let (workflow, store, number) = setup();
        let t = workflow
            .create(request(&number, TransactionType::Deposit, dec!(250)))
            .unwrap();
        workflow.approve(t.id, None).unwrap();

        assert_eq!(store.balance(&number).unwrap(), dec!(1250));
        assert_eq!(store.approved().unwrap().len(), 1);
        let history = store.history(&number).unwrap();
        assert_eq!(history[0].status, TransactionStatus::Approved);
        assert!(history[0].decided_at.is_some());
    }

    #[test]
    fn test_approve_transfer_subtracts_and_records_usage() {
        let (workflow, store, number) = setup();
        let t = workflow
            .create(request(&number, TransactionType::Transfer, dec!(300)))
            .unwrap();
        workflow.approve(t.id, None).unwrap();

        assert_eq!(store.balance(&number).unwrap(), dec!(700));
        assert_eq!(
            store.usage_on(&number, Utc::now().date_naive()).unwrap(),
            dec!(300)
        );
    }

    #[test]
    fn test_approve_emits_audit_and_notification() {
        let (workflow, store, number) = setup();
        let t = workflow
            .create(request(&number, TransactionType::Deposit, dec!(50)))
            .unwrap();
        workflow.approve(t.id, None).unwrap();

        let audit = store.recent_audit(1).unwrap();
        assert_eq!(audit[0].kind, AuditKind::TransactionApproved);
        assert_eq!(
            audit[0].target.transaction_id.as_deref(),
            Some(t.id.to_string().as_str())
        );

        let feed = store.notifications(&number).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].severity, Severity::Success);
    }

    #[test]
    fn test_low_balance_and_large_transaction_alerts() {
        let (workflow, store, number) = setup();
        store
            .set_alert_config(&number, &AlertConfig::default())
            .unwrap();

        // 950 out of 1000 leaves 50, under the 100 threshold; 950 never
        // reaches the 1000 large-transaction threshold.
        let t = workflow
            .create(request(&number, TransactionType::Transfer, dec!(950)))
            .unwrap();
        workflow.approve(t.id, None).unwrap();

        let severities: Vec<Severity> = store
            .notifications(&number)
            .unwrap()
            .iter()
            .map(|n| n.severity)
            .collect();
        assert!(severities.contains(&Severity::Warning));
        assert!(!severities.contains(&Severity::Info));

        // A 1000 deposit triggers the large-transaction notice.
        let t = workflow
            .create(request(&number, TransactionType::Deposit, dec!(1000)))
            .unwrap();
        workflow.approve(t.id, None).unwrap();
        let severities: Vec<Severity> = store
            .notifications(&number)
            .unwrap()
            .iter()
            .map(|n| n.severity)
            .collect();
        assert!(severities.contains(&Severity::Info));
    }

    #[test]
    fn test_reject_leaves_balance_and_queue_untouched() {
        let (workflow, store, number) = setup();
        let t = workflow
            .create(request(&number, TransactionType::Transfer, dec!(250)))
            .unwrap();
        workflow.reject(t.id, "insufficient documentation", None).unwrap();

        assert_eq!(store.balance(&number).unwrap(), dec!(1000));
        assert!(store.approved().unwrap().is_empty());
        assert!(store.pending().unwrap().is_empty());

        let history = store.history(&number).unwrap();
        assert_eq!(history[0].status, TransactionStatus::Declined);
        assert_eq!(
            history[0].decline_reason.as_deref(),
            Some("insufficient documentation")
        );

        let audit = store.recent_audit(1).unwrap();
        assert_eq!(audit[0].kind, AuditKind::TransactionDeclined);
    }

    #[test]
    fn test_terminal_ids_are_not_found() {
        let (workflow, store, number) = setup();
        let t = workflow
            .create(request(&number, TransactionType::Deposit, dec!(100)))
            .unwrap();
        workflow.approve(t.id, None).unwrap();

        assert!(matches!(
            workflow.approve(t.id, None),
            Err(WorkflowError::NotFound(_))
        ));
        assert!(matches!(
            workflow.reject(t.id, "late", None),
            Err(WorkflowError::NotFound(_))
        ));
        // The balance was applied exactly once.
        assert_eq!(store.balance(&number).unwrap(), dec!(1100));
        assert_eq!(store.approved().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let (workflow, _, _) = setup();
        assert!(matches!(
            workflow.approve(Uuid::new_v4(), None),
            Err(WorkflowError::NotFound(_))
        ));
    }

    #[test]
    fn test_adjust_balance_is_fully_audited() {
        let (workflow, store, number) = setup();
        let t = workflow
            .adjust_balance(&number, Amount::new(dec!(500)).unwrap(), "goodwill credit", None)
            .unwrap();

        assert_eq!(t.status, TransactionStatus::Approved);
        assert_eq!(store.balance(&number).unwrap(), dec!(1500));
        assert_eq!(store.history(&number).unwrap().len(), 1);
        assert_eq!(store.approved().unwrap().len(), 1);

        let audit = store.recent_audit(1).unwrap();
        assert_eq!(audit[0].kind, AuditKind::BalanceAdjusted);
        assert_eq!(audit[0].metadata["note"], "goodwill credit");
        assert_eq!(store.notifications(&number).unwrap().len(), 1);
    }
}
