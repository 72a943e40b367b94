//! Console errors

use minibank_registry::RegistryError;
use minibank_store::StoreError;
use minibank_workflow::WorkflowError;
use thiserror::Error;

/// Errors from admin console operations
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Export failed: {0}")]
    Export(#[from] std::io::Error),
}
