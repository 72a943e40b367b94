//! Minibank Domain - Entities and their lifecycle rules
//!
//! This crate contains the records persisted by the store and shared by the
//! registry, workflow engine and admin console:
//! - `Account` / `PendingRegistration`: account lifecycle
//! - `Transaction`: the pending → approved/declined state machine record
//! - `AuditEvent`: append-only trail of admin actions
//! - `Notification`: per-account feed entries
//! - configuration structs (limits, alerts, security policy, app settings)
//! - registration input validation

pub mod account;
pub mod audit;
pub mod config;
pub mod notification;
pub mod transaction;
pub mod validation;

pub use account::{Account, AccountStatus, PendingRegistration, Role};
pub use audit::{AdminActor, AuditEvent, AuditKind, AuditTarget};
pub use config::{AdminCredentials, AlertConfig, AppSettings, DailyLimits, SecurityPolicy};
pub use notification::{Notification, Severity};
pub use transaction::{Transaction, TransactionStatus, TransactionType};
pub use validation::{validate_registration, FieldIssue, RegistrationRequest, ValidationError};
