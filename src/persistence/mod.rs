//! Persistence layer: the `players` collection.
//!
//! [`PlayerStore`] is the capability the registration service needs from
//! storage. Two backends implement it:
//!
//! - [`SqlitePlayerStore`]: relational, via `sqlx::SqlitePool`.
//! - [`DocumentPlayerStore`]: a JSON document collection kept in memory
//!   and optionally mirrored to a file.

pub mod document;
pub mod sqlite;

pub use document::DocumentPlayerStore;
pub use sqlite::SqlitePlayerStore;

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{SantaConfig, StorageBackend};
use crate::domain::{NewPlayer, PlayerRecord};
use crate::error::SantaError;

/// Storage for registration records.
///
/// Implementations must reject a second record with the same `name`, or
/// with the same non-empty `email`, with [`SantaError::PersistenceError`].
#[async_trait]
pub trait PlayerStore: Send + Sync + Debug {
    /// Short backend identifier, reported by `/health`.
    fn backend_name(&self) -> &'static str;

    /// Creates the `players` table/collection if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SantaError::PersistenceError`] on storage failure.
    async fn ensure_schema(&self) -> Result<(), SantaError>;

    /// Looks up the record registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SantaError::PersistenceError`] on storage failure.
    async fn find_by_name(&self, name: &str) -> Result<Option<PlayerRecord>, SantaError>;

    /// Returns every record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SantaError::PersistenceError`] on storage failure.
    async fn list_all(&self) -> Result<Vec<PlayerRecord>, SantaError>;

    /// Stores a new record and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`SantaError::PersistenceError`] on storage failure or a
    /// uniqueness violation.
    async fn insert(&self, player: NewPlayer) -> Result<PlayerRecord, SantaError>;
}

/// Opens the backend selected by `config` and ensures its schema.
///
/// # Errors
///
/// Returns [`SantaError::PersistenceError`] if the backend cannot be
/// opened or initialised.
pub async fn open_store(config: &SantaConfig) -> Result<Arc<dyn PlayerStore>, SantaError> {
    let store: Arc<dyn PlayerStore> = match config.storage_backend {
        StorageBackend::Sqlite => Arc::new(
            SqlitePlayerStore::connect(
                &config.database_url,
                config.database_max_connections,
                Duration::from_secs(config.database_connect_timeout_secs),
            )
            .await?,
        ),
        StorageBackend::Document => match &config.document_store_path {
            Some(path) => Arc::new(DocumentPlayerStore::open(path.clone()).await?),
            None => Arc::new(DocumentPlayerStore::in_memory()),
        },
    };

    store.ensure_schema().await?;
    tracing::info!(backend = store.backend_name(), "player store ready");
    Ok(store)
}
