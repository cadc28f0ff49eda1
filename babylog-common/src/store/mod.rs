//! Storage backends and the backend-selection facade
//!
//! Two interchangeable backends satisfy the same CRUD + bulk-import
//! contract: an embedded SQLite store and a remote multi-tenant REST table
//! partitioned by session identity. Exactly one backend is selected at
//! startup from configuration; the selection is static for the process
//! lifetime.

pub mod local;
pub mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

use crate::config::RemoteConfig;
use crate::identity::Session;
use crate::schema::LogRecord;
use crate::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// The active storage backend, chosen once at startup.
pub enum Store {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl Store {
    /// Select and open a backend: remote when endpoint configuration is
    /// present, local SQLite under the data root otherwise.
    pub async fn open(
        root: &Path,
        remote: Option<RemoteConfig>,
        session: Arc<Session>,
    ) -> Result<Store> {
        match remote {
            Some(config) => {
                info!("Storage mode: remote ({})", config.url);
                Ok(Store::Remote(RemoteStore::new(config, session)))
            }
            None => {
                let db_path = root.join("babylog.db");
                info!("Storage mode: local SQLite ({})", db_path.display());
                Ok(Store::Local(LocalStore::open(&db_path).await?))
            }
        }
    }

    /// All records, normalized, ordered by `date` descending.
    pub async fn list(&self) -> Result<Vec<LogRecord>> {
        match self {
            Store::Local(store) => store.list().await,
            Store::Remote(store) => store.list().await,
        }
    }

    /// Insert-or-replace keyed by `id`; returns the stored record unchanged.
    pub async fn upsert(&self, record: LogRecord) -> Result<LogRecord> {
        match self {
            Store::Local(store) => store.upsert(record).await,
            Store::Remote(store) => store.upsert(record).await,
        }
    }

    /// Delete by `id`; an absent id is success.
    pub async fn remove(&self, id: &str) -> Result<()> {
        match self {
            Store::Local(store) => store.remove(id).await,
            Store::Remote(store) => store.remove(id).await,
        }
    }

    /// Store every record under a freshly generated `id` (copy-on-import).
    pub async fn bulk_import(&self, records: Vec<LogRecord>) -> Result<()> {
        match self {
            Store::Local(store) => store.bulk_import(records).await,
            Store::Remote(store) => store.bulk_import(records).await,
        }
    }
}
