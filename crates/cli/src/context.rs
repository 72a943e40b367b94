//! Application context
//!
//! Wires the sqlite-backed mirror store, the event bus and the service
//! layers together for the command handlers.

use anyhow::Context as _;
use minibank_bus::EventBus;
use minibank_console::AdminConsole;
use minibank_domain::AdminActor;
use minibank_registry::AccountRegistry;
use minibank_store::{AccountRepository, MirrorStore, RemoteStore, SqliteStore};
use minibank_workflow::TransactionWorkflow;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// The backend every command runs against: sqlite locally, mirrored to
/// the collection service when a remote URL is configured.
pub type Store = MirrorStore<SqliteStore>;

pub struct AppContext {
    pub store: Arc<Store>,
    pub bus: EventBus,
    pub registry: AccountRegistry<Store>,
    pub workflow: TransactionWorkflow<Store>,
    /// Separate client for the service's login endpoint. The mirror owns
    /// its own; login is the one call made outside the store traits.
    pub remote: Option<RemoteStore>,
}

impl AppContext {
    pub fn new(data_path: &Path, remote_url: Option<&str>) -> anyhow::Result<Self> {
        std::fs::create_dir_all(data_path)
            .with_context(|| format!("Failed to create data directory: {}", data_path.display()))?;

        let db_path = data_path.join("minibank.db");
        let local = SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

        let store = Arc::new(match remote_url {
            Some(url) => {
                info!(url, "mirroring to remote collection service");
                MirrorStore::with_remote(local, RemoteStore::new(url)?)
            }
            None => MirrorStore::new(local),
        });
        let remote = remote_url.map(RemoteStore::new).transpose()?;
        let bus = EventBus::new();

        Ok(Self {
            registry: AccountRegistry::new(store.clone(), bus.clone()),
            workflow: TransactionWorkflow::new(store.clone(), bus.clone()),
            store,
            bus,
            remote,
        })
    }

    /// Console acting as the admin configured in settings.
    pub fn console(&self) -> anyhow::Result<AdminConsole<Store>> {
        let settings = self.store.settings()?;
        Ok(AdminConsole::new(
            self.store.clone(),
            self.bus.clone(),
            AdminActor {
                name: settings.admin.name,
                email: settings.admin.email,
            },
        ))
    }
}
