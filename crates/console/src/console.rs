//! Admin review console
//!
//! A read+act façade over the registry and workflow engine. Every action
//! is stamped with the acting admin so the audit trail names them. The
//! console has no mutation paths of its own; balance adjustments go
//! through the workflow engine like everything else.

use crate::error::ConsoleError;
use minibank_bus::EventBus;
use minibank_core::{AccountNumber, Amount};
use minibank_domain::{
    Account, AdminActor, AuditEvent, PendingRegistration, Transaction,
};
use minibank_registry::AccountRegistry;
use minibank_store::BankStore;
use minibank_workflow::TransactionWorkflow;
use std::io::Write;
use std::sync::Arc;
use uuid::Uuid;

/// Most recent audit entries served when no limit is given.
pub const DEFAULT_AUDIT_LIMIT: usize = 500;

/// Counts shown on the console landing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleStats {
    pub accounts: usize,
    pub pending_registrations: usize,
    pub pending_transactions: usize,
    pub approved_transactions: usize,
}

pub struct AdminConsole<S: BankStore> {
    store: Arc<S>,
    registry: AccountRegistry<S>,
    workflow: TransactionWorkflow<S>,
    admin: AdminActor,
}

impl<S: BankStore> AdminConsole<S> {
    pub fn new(store: Arc<S>, bus: EventBus, admin: AdminActor) -> Self {
        Self {
            registry: AccountRegistry::new(store.clone(), bus.clone()),
            workflow: TransactionWorkflow::new(store.clone(), bus),
            store,
            admin,
        }
    }

    // Review queues. Backed by the store adapter, so a configured remote
    // is consulted first and the local cache refreshed.

    pub fn pending_registrations(&self) -> Result<Vec<PendingRegistration>, ConsoleError> {
        Ok(self.store.list_registrations()?)
    }

    pub fn pending_transactions(&self) -> Result<Vec<Transaction>, ConsoleError> {
        Ok(self.store.pending()?)
    }

    pub fn accounts(&self) -> Result<Vec<Account>, ConsoleError> {
        Ok(self.store.list_accounts()?)
    }

    pub fn stats(&self) -> Result<ConsoleStats, ConsoleError> {
        Ok(ConsoleStats {
            accounts: self.store.list_accounts()?.len(),
            pending_registrations: self.store.list_registrations()?.len(),
            pending_transactions: self.store.pending()?.len(),
            approved_transactions: self.store.approved()?.len(),
        })
    }

    // Review actions.

    pub fn approve_registration(&self, number: &AccountNumber) -> Result<Account, ConsoleError> {
        Ok(self
            .registry
            .approve_registration(number, Some(self.admin.clone()))?)
    }

    pub fn reject_registration(
        &self,
        number: &AccountNumber,
        reason: &str,
    ) -> Result<PendingRegistration, ConsoleError> {
        Ok(self
            .registry
            .reject_registration(number, reason, Some(self.admin.clone()))?)
    }

    pub fn approve_transaction(&self, id: Uuid) -> Result<Transaction, ConsoleError> {
        Ok(self.workflow.approve(id, Some(self.admin.clone()))?)
    }

    pub fn reject_transaction(&self, id: Uuid, reason: &str) -> Result<Transaction, ConsoleError> {
        Ok(self.workflow.reject(id, reason, Some(self.admin.clone()))?)
    }

    pub fn freeze_account(&self, number: &AccountNumber) -> Result<Account, ConsoleError> {
        Ok(self.registry.freeze(number, Some(self.admin.clone()))?)
    }

    pub fn unfreeze_account(&self, number: &AccountNumber) -> Result<Account, ConsoleError> {
        Ok(self.registry.unfreeze(number, Some(self.admin.clone()))?)
    }

    pub fn delete_account(&self, number: &AccountNumber) -> Result<(), ConsoleError> {
        Ok(self.registry.delete(number, Some(self.admin.clone()))?)
    }

    pub fn purge_non_admin(&self) -> Result<usize, ConsoleError> {
        Ok(self.registry.purge_non_admin(Some(self.admin.clone()))?)
    }

    /// Credit an account outside the normal submission flow. Produces a
    /// transaction record, an audit entry and a notification like any
    /// other approval.
    pub fn adjust_balance(
        &self,
        number: &AccountNumber,
        amount: Amount,
        note: &str,
    ) -> Result<Transaction, ConsoleError> {
        Ok(self
            .workflow
            .adjust_balance(number, amount, note, Some(self.admin.clone()))?)
    }

    // Audit trail.

    pub fn audit(&self, limit: Option<usize>) -> Result<Vec<AuditEvent>, ConsoleError> {
        Ok(self
            .store
            .recent_audit(limit.unwrap_or(DEFAULT_AUDIT_LIMIT))?)
    }

    /// Write the most recent audit entries as one JSON object per line.
    /// Returns the number of lines written.
    pub fn export_audit_jsonl<W: Write>(
        &self,
        writer: &mut W,
        limit: Option<usize>,
    ) -> Result<usize, ConsoleError> {
        let events = self.audit(limit)?;
        for event in &events {
            serde_json::to_writer(&mut *writer, event).map_err(minibank_store::StoreError::from)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(events.len())
    }
}
