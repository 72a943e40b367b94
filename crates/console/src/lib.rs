//! Minibank Console - Admin review surface
//!
//! Merged pending views, approve/reject/freeze/delete/purge actions,
//! audited balance adjustment, and audit querying/export.

pub mod console;
pub mod error;

pub use console::{AdminConsole, ConsoleStats, DEFAULT_AUDIT_LIMIT};
pub use error::ConsoleError;
