//! Account registry
//!
//! Owns the account lifecycle: registration intake, admin review of
//! registrations, PIN management, freeze/delete/purge and login.

use crate::error::RegistryError;
use crate::lockout::LockoutTracker;
use chrono::Utc;
use minibank_bus::{BankEvent, EventBus};
use minibank_core::{AccountNumber, RoutingNumber, TransactionPin};
use minibank_domain::{
    validate_registration, Account, AccountStatus, AdminActor, AdminCredentials, AuditEvent,
    AuditKind, AuditTarget, DailyLimits, PendingRegistration, RegistrationRequest,
};
use minibank_store::{BankStore, RegistrationOutcome, StoreError};
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Who a successful login identifies.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// The built-in admin record from settings
    Admin(AdminCredentials),
    User(Account),
}

pub struct AccountRegistry<S: BankStore> {
    store: Arc<S>,
    bus: EventBus,
    lockout: LockoutTracker,
}

impl<S: BankStore> AccountRegistry<S> {
    pub fn new(store: Arc<S>, bus: EventBus) -> Self {
        Self {
            store,
            bus,
            lockout: LockoutTracker::new(),
        }
    }

    /// Take in a registration request. The applicant gets an account number
    /// immediately; the balance stays zero no matter what was asked for, and
    /// the PIN is a system placeholder until the holder picks one.
    pub fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<PendingRegistration, RegistryError> {
        validate_registration(request)?;

        let email = request.email.trim().to_string();
        if self.store.find_account_by_email(&email)?.is_some()
            || self.store.find_registration_by_email(&email)?.is_some()
        {
            return Err(RegistryError::DuplicateEmail(email));
        }

        let registration = PendingRegistration {
            account_number: self.unique_account_number()?,
            email: email.clone(),
            name: request.full_name(),
            password: request.password.clone(),
            phone: request.phone.trim().to_string(),
            pin: TransactionPin::system_assigned(),
            requested_at: Utc::now(),
        };
        self.store.save_registration(&registration)?;

        info!(account = %registration.account_number, "registration submitted");
        self.bus.publish(BankEvent::RegistrationSubmitted {
            account_number: registration.account_number.clone(),
            email,
            timestamp: registration.requested_at,
        });
        Ok(registration)
    }

    /// Promote a pending registration to a live account: status active,
    /// role user, zero balance, default limits, fresh routing number.
    pub fn approve_registration(
        &self,
        number: &AccountNumber,
        admin: Option<AdminActor>,
    ) -> Result<Account, RegistryError> {
        let registration = self
            .store
            .remove_registration(number, RegistrationOutcome::Approved)
            .map_err(not_found)?;

        let routing = self.unique_routing_number()?;
        let account = registration.promote(routing, Utc::now());
        self.store.save_account(&account)?;
        self.store.set_balance(&account.account_number, Decimal::ZERO)?;
        self.store
            .set_limits(&account.account_number, &DailyLimits::default())?;

        self.store.append_audit(&AuditEvent::new(
            AuditKind::RegistrationApproved,
            admin,
            AuditTarget::account(account.account_number.as_str()).with_email(&account.email),
            json!({ "routing_number": account.routing_number }),
        ))?;

        info!(account = %account.account_number, "registration approved");
        self.bus.publish(BankEvent::RegistrationApproved {
            account_number: account.account_number.clone(),
            email: account.email.clone(),
            timestamp: Utc::now(),
        });
        Ok(account)
    }

    /// Discard a pending registration. The only trace left is the audit entry.
    pub fn reject_registration(
        &self,
        number: &AccountNumber,
        reason: &str,
        admin: Option<AdminActor>,
    ) -> Result<PendingRegistration, RegistryError> {
        let registration = self
            .store
            .remove_registration(
                number,
                RegistrationOutcome::Rejected {
                    reason: reason.to_string(),
                },
            )
            .map_err(not_found)?;

        self.store.append_audit(&AuditEvent::new(
            AuditKind::RegistrationRejected,
            admin,
            AuditTarget::account(number.as_str()).with_email(&registration.email),
            json!({ "reason": reason }),
        ))?;

        info!(account = %number, "registration rejected");
        self.bus.publish(BankEvent::RegistrationRejected {
            email: registration.email.clone(),
            reason: reason.to_string(),
            timestamp: Utc::now(),
        });
        Ok(registration)
    }

    /// Set or change the transaction PIN. The current PIN is required only
    /// once a user-chosen PIN exists; the system placeholder never is.
    pub fn set_pin(
        &self,
        number: &AccountNumber,
        current: Option<&str>,
        new: &str,
        confirm: &str,
    ) -> Result<(), RegistryError> {
        let mut account = self
            .store
            .find_account(number)?
            .ok_or_else(|| RegistryError::NotFound(number.to_string()))?;

        if new != confirm {
            return Err(RegistryError::PinConfirmMismatch);
        }
        if account.pin.is_user_set() {
            match current {
                Some(entered) if account.pin.matches(entered) => {}
                _ => return Err(RegistryError::CurrentPinMismatch),
            }
        }

        account.pin = TransactionPin::user_chosen(new)?;
        self.store.save_account(&account)?;
        info!(account = %number, "transaction PIN set");
        Ok(())
    }

    pub fn freeze(
        &self,
        number: &AccountNumber,
        admin: Option<AdminActor>,
    ) -> Result<Account, RegistryError> {
        let account = self.set_status(number, AccountStatus::Frozen, "frozen")?;
        self.store.append_audit(&AuditEvent::new(
            AuditKind::UserFrozen,
            admin,
            AuditTarget::account(number.as_str()).with_email(&account.email),
            json!(null),
        ))?;
        self.bus.publish(BankEvent::AccountFrozen {
            account_number: number.clone(),
            timestamp: Utc::now(),
        });
        Ok(account)
    }

    pub fn unfreeze(
        &self,
        number: &AccountNumber,
        admin: Option<AdminActor>,
    ) -> Result<Account, RegistryError> {
        let account = self.set_status(number, AccountStatus::Active, "unfrozen")?;
        self.store.append_audit(&AuditEvent::new(
            AuditKind::UserUnfrozen,
            admin,
            AuditTarget::account(number.as_str()).with_email(&account.email),
            json!(null),
        ))?;
        self.bus.publish(BankEvent::AccountUnfrozen {
            account_number: number.clone(),
            timestamp: Utc::now(),
        });
        Ok(account)
    }

    /// Remove an account and everything keyed by it: balance, history,
    /// notifications. Admin-role accounts are exempt.
    pub fn delete(
        &self,
        number: &AccountNumber,
        admin: Option<AdminActor>,
    ) -> Result<(), RegistryError> {
        let account = self
            .store
            .find_account(number)?
            .ok_or_else(|| RegistryError::NotFound(number.to_string()))?;
        if account.is_admin() {
            return Err(RegistryError::AdminProtected("deleted"));
        }

        self.cascade_delete(number)?;
        self.store.append_audit(&AuditEvent::new(
            AuditKind::UserDeleted,
            admin,
            AuditTarget::account(number.as_str()).with_email(&account.email),
            json!(null),
        ))?;

        info!(account = %number, "account deleted");
        self.bus.publish(BankEvent::AccountDeleted {
            account_number: number.clone(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Delete every non-admin account with full cascades. Returns the count.
    pub fn purge_non_admin(&self, admin: Option<AdminActor>) -> Result<usize, RegistryError> {
        let victims: Vec<Account> = self
            .store
            .list_accounts()?
            .into_iter()
            .filter(|a| !a.is_admin())
            .collect();

        for account in &victims {
            self.cascade_delete(&account.account_number)?;
            self.bus.publish(BankEvent::AccountDeleted {
                account_number: account.account_number.clone(),
                timestamp: Utc::now(),
            });
        }

        self.store.append_audit(&AuditEvent::new(
            AuditKind::UsersPurged,
            admin,
            AuditTarget::default(),
            json!({ "count": victims.len() }),
        ))?;
        info!(count = victims.len(), "non-admin accounts purged");
        Ok(victims.len())
    }

    /// Authenticate. The configured admin record is checked first and is
    /// exempt from maintenance mode and lockout. Frozen accounts may still
    /// log in; blocked and pending may not.
    pub fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, RegistryError> {
        let email = email.trim();
        let settings = self.store.settings()?;
        let policy = self.store.security_policy()?;
        let now = Utc::now();

        if settings.admin.email.eq_ignore_ascii_case(email) {
            if settings.admin.password == password {
                return Ok(LoginOutcome::Admin(settings.admin));
            }
            return Err(RegistryError::InvalidCredentials);
        }

        if settings.maintenance_mode {
            return Err(RegistryError::Maintenance(settings.maintenance_message));
        }
        if let Some(until) = self.lockout.locked_until(email, now) {
            return Err(RegistryError::LockedOut { until });
        }

        let account = self.store.find_account_by_email(email)?;
        match account {
            Some(account) if account.password == password => {
                if !account.can_login() {
                    return Err(RegistryError::LoginBlocked(account.status));
                }
                self.lockout.clear(email);
                Ok(LoginOutcome::User(account))
            }
            _ => match self.lockout.record_failure(email, &policy, now) {
                Some(until) => Err(RegistryError::LockedOut { until }),
                None => Err(RegistryError::InvalidCredentials),
            },
        }
    }

    fn set_status(
        &self,
        number: &AccountNumber,
        status: AccountStatus,
        action: &'static str,
    ) -> Result<Account, RegistryError> {
        let mut account = self
            .store
            .find_account(number)?
            .ok_or_else(|| RegistryError::NotFound(number.to_string()))?;
        if account.is_admin() {
            return Err(RegistryError::AdminProtected(action));
        }
        account.status = status;
        self.store.save_account(&account)?;
        info!(account = %number, action, "account status changed");
        Ok(account)
    }

    fn cascade_delete(&self, number: &AccountNumber) -> Result<(), RegistryError> {
        self.store.delete_account(number)?;
        self.store.clear_history(number)?;
        self.store.clear_notifications(number)?;
        Ok(())
    }

    fn unique_account_number(&self) -> Result<AccountNumber, RegistryError> {
        let registered: HashSet<String> = self
            .store
            .list_registrations()?
            .into_iter()
            .map(|r| r.account_number.to_string())
            .collect();
        loop {
            let candidate = AccountNumber::generate();
            if self.store.find_account(&candidate)?.is_none()
                && !registered.contains(candidate.as_str())
            {
                return Ok(candidate);
            }
        }
    }

    fn unique_routing_number(&self) -> Result<RoutingNumber, RegistryError> {
        let taken: HashSet<String> = self
            .store
            .list_accounts()?
            .into_iter()
            .filter_map(|a| a.routing_number.map(|r| r.to_string()))
            .collect();
        loop {
            let candidate = RoutingNumber::generate();
            if !taken.contains(candidate.as_str()) {
                return Ok(candidate);
            }
        }
    }
}

fn not_found(err: StoreError) -> RegistryError {
    match err {
        StoreError::NotFound(what) => RegistryError::NotFound(what),
        other => RegistryError::Store(other),
    }
}
