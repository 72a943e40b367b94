//! Minibank Registry - Account lifecycle
//!
//! Registration intake with validation, admin approval/rejection of
//! registrations, PIN management, freeze/unfreeze/delete/purge with
//! cascades, and login with a per-email lockout policy.

pub mod error;
pub mod lockout;
pub mod registry;

pub use error::RegistryError;
pub use lockout::LockoutTracker;
pub use registry::{AccountRegistry, LoginOutcome};
