//! Account and pending-registration records

use chrono::{DateTime, Utc};
use minibank_core::{AccountNumber, RoutingNumber, TransactionPin};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Lifecycle status of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Registration approved but not yet activated
    Pending,
    /// Normal operating state
    Active,
    /// Login still allowed, transactions blocked
    Frozen,
    /// Login blocked entirely
    Blocked,
}

/// Role of an account holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// An approved account.
///
/// The balance deliberately does NOT live here: the store keeps it under a
/// per-account balance key so there is exactly one canonical copy. Limits,
/// usage counters and alert thresholds live in the store the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique 12-digit account number
    pub account_number: AccountNumber,
    /// Assigned when the registration is approved
    pub routing_number: Option<RoutingNumber>,
    /// Unique login key
    pub email: String,
    /// Display name
    pub name: String,
    /// Stored as-is; this is a demo system, not a credential vault
    pub password: String,
    pub phone: String,
    pub pin: TransactionPin,
    pub status: AccountStatus,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Frozen accounts may still log in; blocked and pending may not.
    pub fn can_login(&self) -> bool {
        matches!(self.status, AccountStatus::Active | AccountStatus::Frozen)
    }
}

/// A registration awaiting admin review.
///
/// Balance is always zero at this stage regardless of what the applicant
/// asked for; the account number is already assigned so uniqueness checks
/// can span both accounts and registrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRegistration {
    pub account_number: AccountNumber,
    pub email: String,
    pub name: String,
    pub password: String,
    pub phone: String,
    /// System-assigned; `user_set` stays false until the holder picks one
    pub pin: TransactionPin,
    pub requested_at: DateTime<Utc>,
}

impl PendingRegistration {
    /// Promote to a live account. The routing number is generated by the
    /// registry at approval time; the PIN carries over still not user-set.
    pub fn promote(self, routing_number: RoutingNumber, now: DateTime<Utc>) -> Account {
        Account {
            account_number: self.account_number,
            routing_number: Some(routing_number),
            email: self.email,
            name: self.name,
            password: self.password,
            phone: self.phone,
            pin: self.pin,
            status: AccountStatus::Active,
            role: Role::User,
            joined_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn registration() -> PendingRegistration {
        PendingRegistration {
            account_number: AccountNumber::new("123456789012").unwrap(),
            email: "jane@example.com".to_string(),
            name: "Jane Doe".to_string(),
            password: "hunter22".to_string(),
            phone: "5551234567".to_string(),
            pin: TransactionPin::system_assigned(),
            requested_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(AccountStatus::Active.to_string(), "active");
        assert_eq!(AccountStatus::from_str("frozen").unwrap(), AccountStatus::Frozen);
        assert!(AccountStatus::from_str("gone").is_err());
    }

    #[test]
    fn test_promote_yields_active_user() {
        let now = Utc::now();
        let account = registration().promote(RoutingNumber::generate(), now);
        assert_eq!(account.status, AccountStatus::Active);
        assert_eq!(account.role, Role::User);
        assert!(account.routing_number.is_some());
        assert!(!account.pin.is_user_set());
        assert_eq!(account.joined_at, now);
    }

    #[test]
    fn test_login_eligibility_by_status() {
        let mut account = registration().promote(RoutingNumber::generate(), Utc::now());
        assert!(account.can_login());
        account.status = AccountStatus::Frozen;
        assert!(account.can_login());
        account.status = AccountStatus::Blocked;
        assert!(!account.can_login());
        account.status = AccountStatus::Pending;
        assert!(!account.can_login());
    }
}
