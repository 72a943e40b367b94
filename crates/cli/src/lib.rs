//! Minibank CLI - command orchestrator

pub mod commands;
pub mod context;

pub use context::AppContext;
