//! SQLite implementation of the persistence layer.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::PlayerStore;
use crate::domain::{NewPlayer, PlayerRecord};
use crate::error::SantaError;

type PlayerRow = (i64, String, Option<String>, String, DateTime<Utc>);

const CREATE_PLAYERS: &str = "CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    email TEXT UNIQUE,
    receiver TEXT NOT NULL,
    registered_at TEXT NOT NULL
)";

/// SQLite-backed player store using `sqlx::SqlitePool`.
#[derive(Debug, Clone)]
pub struct SqlitePlayerStore {
    pool: SqlitePool,
}

impl SqlitePlayerStore {
    /// Wraps an existing connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `url`, e.g.
    /// `sqlite://players.db`.
    ///
    /// # Errors
    ///
    /// Returns [`SantaError::PersistenceError`] if the URL is invalid or
    /// the database cannot be opened.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, SantaError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Opens a private in-memory database.
    ///
    /// The pool is pinned to a single connection that never expires,
    /// since every SQLite `:memory:` connection is a separate database.
    ///
    /// # Errors
    ///
    /// Returns [`SantaError::PersistenceError`] if SQLite cannot be opened.
    pub async fn in_memory() -> Result<Self, SantaError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }
}

fn into_record((id, name, email, receiver, registered_at): PlayerRow) -> PlayerRecord {
    PlayerRecord {
        id,
        name,
        email,
        receiver,
        registered_at,
    }
}

#[async_trait]
impl PlayerStore for SqlitePlayerStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn ensure_schema(&self) -> Result<(), SantaError> {
        sqlx::query(CREATE_PLAYERS).execute(&self.pool).await?;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<PlayerRecord>, SantaError> {
        let row = sqlx::query_as::<_, PlayerRow>(
            "SELECT id, name, email, receiver, registered_at FROM players WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(into_record))
    }

    async fn list_all(&self) -> Result<Vec<PlayerRecord>, SantaError> {
        let rows = sqlx::query_as::<_, PlayerRow>(
            "SELECT id, name, email, receiver, registered_at FROM players ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(into_record).collect())
    }

    async fn insert(&self, player: NewPlayer) -> Result<PlayerRecord, SantaError> {
        let registered_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO players (name, email, receiver, registered_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&player.name)
        .bind(player.email.as_deref())
        .bind(&player.receiver)
        .bind(registered_at)
        .execute(&self.pool)
        .await?;

        Ok(player.into_record(result.last_insert_rowid(), registered_at))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn make_store() -> SqlitePlayerStore {
        let Ok(store) = SqlitePlayerStore::in_memory().await else {
            panic!("in-memory sqlite");
        };
        let Ok(()) = store.ensure_schema().await else {
            panic!("schema creation failed");
        };
        store
    }

    fn player(name: &str, email: Option<&str>, receiver: &str) -> NewPlayer {
        NewPlayer {
            name: name.to_string(),
            email: email.map(ToString::to_string),
            receiver: receiver.to_string(),
        }
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let store = make_store().await;
        assert!(store.ensure_schema().await.is_ok());
    }

    #[tokio::test]
    async fn insert_then_find() {
        let store = make_store().await;
        let Ok(stored) = store.insert(player("Omar", Some("omar@example.com"), "Salman")).await
        else {
            panic!("insert failed");
        };
        assert_eq!(stored.id, 1);

        let Ok(Some(found)) = store.find_by_name("Omar").await else {
            panic!("record not found");
        };
        assert_eq!(found.receiver, "Salman");
        assert_eq!(found.email.as_deref(), Some("omar@example.com"));

        let Ok(missing) = store.find_by_name("Salman").await else {
            panic!("lookup failed");
        };
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn list_all_is_in_insertion_order() {
        let store = make_store().await;
        for (name, receiver) in [("Omar", "Salman"), ("Aroob", "Omar"), ("Salman", "Aroob")] {
            assert!(store.insert(player(name, None, receiver)).await.is_ok());
        }

        let Ok(all) = store.list_all().await else {
            panic!("list failed");
        };
        let names: Vec<&str> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Omar", "Aroob", "Salman"]);
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let store = make_store().await;
        assert!(store.insert(player("Omar", None, "Salman")).await.is_ok());

        let result = store.insert(player("Omar", None, "Aroob")).await;
        assert!(matches!(result, Err(SantaError::PersistenceError(_))));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_but_missing_emails_are_not() {
        let store = make_store().await;
        assert!(store.insert(player("Omar", Some("a@x.io"), "Salman")).await.is_ok());
        assert!(store.insert(player("Aroob", None, "Omar")).await.is_ok());
        assert!(store.insert(player("Salman", None, "Aroob")).await.is_ok());

        let result = store.insert(player("Mohammed", Some("a@x.io"), "Abdullah")).await;
        assert!(matches!(result, Err(SantaError::PersistenceError(_))));
    }

    #[tokio::test]
    async fn file_database_survives_reconnect() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let url = format!("sqlite://{}", dir.path().join("players.db").display());

        let Ok(store) = SqlitePlayerStore::connect(&url, 2, Duration::from_secs(5)).await else {
            panic!("connect failed");
        };
        assert!(store.ensure_schema().await.is_ok());
        assert!(store.insert(player("Omar", None, "Salman")).await.is_ok());
        drop(store);

        let Ok(reopened) = SqlitePlayerStore::connect(&url, 2, Duration::from_secs(5)).await else {
            panic!("reconnect failed");
        };
        assert!(reopened.ensure_schema().await.is_ok());
        let Ok(all) = reopened.list_all().await else {
            panic!("list failed");
        };
        assert_eq!(all.len(), 1);
    }
}
