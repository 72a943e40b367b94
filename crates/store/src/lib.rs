//! Minibank Store - Persistent store adapter
//!
//! Typed repositories over three backends:
//! - `MemoryStore`: hash maps behind a mutex, for tests and ephemeral runs
//! - `SqliteStore`: durable single-file database
//! - `RemoteStore`: blocking client for the remote collection service
//!
//! `MirrorStore` pairs a local backend with the remote client and applies
//! the reconciliation policy: remote authoritative, local refreshed on
//! every successful remote read, remote writes attempted once and never
//! able to fail the operation.

pub mod error;
pub mod memory;
pub mod mirror;
pub mod remote;
pub mod sqlite;
pub mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use mirror::MirrorStore;
pub use remote::RemoteStore;
pub use sqlite::SqliteStore;
pub use traits::{
    AccountRepository, AuditRepository, BankStore, NotificationRepository, RegistrationOutcome,
    TransactionRepository,
};
