//! Minibank Workflow - Transaction state machine
//!
//! Pending transactions flow through exactly one engine:
//! create (policy gates) → approve (balance applied) / reject (reason kept).
//! Every terminal transition produces an audit entry, a notification and a
//! bus event. Admin balance adjustments go through the same engine.

pub mod engine;
pub mod error;

pub use engine::{TransactionRequest, TransactionWorkflow};
pub use error::WorkflowError;
