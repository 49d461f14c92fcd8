//! Document-collection implementation of the persistence layer.
//!
//! The `players` collection is held in memory as a list of JSON
//! documents. When a path is configured the whole collection is written
//! back to that file after every insert (write to a sibling temp file,
//! then rename), and read once on open.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::PlayerStore;
use crate::domain::{NewPlayer, PlayerRecord};
use crate::error::SantaError;

/// On-disk shape of the collection file.
#[derive(Debug, Deserialize)]
struct PlayersDocument {
    players: Vec<PlayerRecord>,
}

#[derive(Debug, Serialize)]
struct PlayersDocumentRef<'a> {
    players: &'a [PlayerRecord],
}

/// JSON document store for player records.
#[derive(Debug)]
pub struct DocumentPlayerStore {
    path: Option<PathBuf>,
    players: RwLock<Vec<PlayerRecord>>,
}

impl DocumentPlayerStore {
    /// Creates an empty store that never touches the filesystem.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            players: RwLock::new(Vec::new()),
        }
    }

    /// Opens the collection stored at `path`. A missing file is an empty
    /// collection; it is created on the first insert.
    ///
    /// # Errors
    ///
    /// Returns [`SantaError::PersistenceError`] if the file exists but
    /// cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, SantaError> {
        let path = path.into();
        let players = if fs::try_exists(&path).await? {
            let bytes = fs::read(&path).await?;
            let doc: PlayersDocument = serde_json::from_slice(&bytes)?;
            info!(path = %path.display(), count = doc.players.len(), "loaded player documents");
            doc.players
        } else {
            debug!(path = %path.display(), "document store file not found, starting empty");
            Vec::new()
        };

        Ok(Self {
            path: Some(path),
            players: RwLock::new(players),
        })
    }

    /// The backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn flush(&self, players: &[PlayerRecord]) -> Result<(), SantaError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(&PlayersDocumentRef { players })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }
}

/// Describes why `player` cannot join `existing`, if it cannot.
fn uniqueness_violation(existing: &[PlayerRecord], player: &NewPlayer) -> Option<String> {
    if existing.iter().any(|p| p.name == player.name) {
        return Some(format!("duplicate key: players.name = {}", player.name));
    }
    let email = player.email.as_deref()?;
    existing
        .iter()
        .any(|p| p.email.as_deref() == Some(email))
        .then(|| format!("duplicate key: players.email = {email}"))
}

#[async_trait]
impl PlayerStore for DocumentPlayerStore {
    fn backend_name(&self) -> &'static str {
        "document"
    }

    async fn ensure_schema(&self) -> Result<(), SantaError> {
        let parent = self
            .path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<PlayerRecord>, SantaError> {
        let players = self.players.read().await;
        Ok(players.iter().find(|p| p.name == name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<PlayerRecord>, SantaError> {
        Ok(self.players.read().await.clone())
    }

    async fn insert(&self, player: NewPlayer) -> Result<PlayerRecord, SantaError> {
        let mut players = self.players.write().await;

        if let Some(violation) = uniqueness_violation(&players, &player) {
            return Err(SantaError::PersistenceError(violation));
        }

        let next_id = players.iter().map(|p| p.id).max().unwrap_or(0).saturating_add(1);
        let record = player.into_record(next_id, Utc::now());
        players.push(record.clone());

        if let Err(e) = self.flush(&players).await {
            players.pop();
            return Err(e);
        }

        Ok(record)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn player(name: &str, email: Option<&str>, receiver: &str) -> NewPlayer {
        NewPlayer {
            name: name.to_string(),
            email: email.map(ToString::to_string),
            receiver: receiver.to_string(),
        }
    }

    #[test]
    fn in_memory_store_starts_empty() {
        let store = DocumentPlayerStore::in_memory();
        assert!(store.path().is_none());
        let Ok(all) = tokio_test::block_on(store.list_all()) else {
            panic!("list failed");
        };
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = DocumentPlayerStore::in_memory();
        let Ok(first) = store.insert(player("Omar", None, "Salman")).await else {
            panic!("insert failed");
        };
        let Ok(second) = store.insert(player("Salman", None, "Aroob")).await else {
            panic!("insert failed");
        };
        assert_eq!((first.id, second.id), (1, 2));

        let Ok(Some(found)) = store.find_by_name("Salman").await else {
            panic!("not found");
        };
        assert_eq!(found.receiver, "Aroob");
    }

    #[tokio::test]
    async fn uniqueness_is_enforced() {
        let store = DocumentPlayerStore::in_memory();
        assert!(store.insert(player("Omar", Some("o@x.io"), "Salman")).await.is_ok());

        let dup_name = store.insert(player("Omar", None, "Aroob")).await;
        assert!(matches!(dup_name, Err(SantaError::PersistenceError(_))));

        let dup_email = store.insert(player("Aroob", Some("o@x.io"), "Omar")).await;
        assert!(matches!(dup_email, Err(SantaError::PersistenceError(_))));

        assert!(store.insert(player("Aroob", None, "Omar")).await.is_ok());
        assert!(store.insert(player("Salman", None, "Aroob")).await.is_ok());

        let Ok(all) = store.list_all().await else {
            panic!("list failed");
        };
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn collection_is_reloaded_from_file() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("data").join("players.json");

        let Ok(store) = DocumentPlayerStore::open(&path).await else {
            panic!("open failed");
        };
        assert!(store.ensure_schema().await.is_ok());
        assert!(store.insert(player("Omar", Some("o@x.io"), "Salman")).await.is_ok());
        drop(store);

        let Ok(reopened) = DocumentPlayerStore::open(&path).await else {
            panic!("reopen failed");
        };
        let Ok(Some(found)) = reopened.find_by_name("Omar").await else {
            panic!("record lost");
        };
        assert_eq!(found.email.as_deref(), Some("o@x.io"));
    }

    #[tokio::test]
    async fn failed_write_leaves_collection_unchanged() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("players.json");
        let Ok(store) = DocumentPlayerStore::open(&path).await else {
            panic!("open failed");
        };
        // A directory at the target path makes the final rename fail.
        assert!(std::fs::create_dir(&path).is_ok());

        let result = store.insert(player("Omar", None, "Salman")).await;
        assert!(matches!(result, Err(SantaError::PersistenceError(_))));
        let Ok(all) = store.list_all().await else {
            panic!("list failed");
        };
        assert!(all.is_empty());

        assert!(std::fs::remove_dir(&path).is_ok());
        let Ok(record) = store.insert(player("Omar", None, "Salman")).await else {
            panic!("insert after recovery failed");
        };
        assert_eq!(record.id, 1);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_persistence_error() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("players.json");
        assert!(std::fs::write(&path, b"not json").is_ok());

        let result = DocumentPlayerStore::open(&path).await;
        assert!(matches!(result, Err(SantaError::PersistenceError(_))));
    }
}
