//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Unset or unparsable values fall back
//! to defaults; only an unparsable `LISTEN_ADDR` is fatal.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::{Locale, Roster};
use crate::error::SantaError;

/// Which [`crate::persistence::PlayerStore`] backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Relational store in a SQLite database.
    #[default]
    Sqlite,
    /// JSON document collection.
    Document,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sql" => Ok(Self::Sqlite),
            "document" | "json" => Ok(Self::Document),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`SantaConfig::from_env`].
#[derive(Debug, Clone)]
pub struct SantaConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Storage backend selection.
    pub storage_backend: StorageBackend,

    /// SQLite connection string.
    pub database_url: String,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// File holding the document collection; `None` keeps it in memory.
    pub document_store_path: Option<PathBuf>,

    /// Names allowed to register.
    pub roster: Roster,

    /// Whether every registration must carry an email.
    pub require_email: bool,

    /// Language of user-facing messages.
    pub locale: Locale,

    /// Directory served for every non-API path.
    pub public_dir: PathBuf,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for SantaConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            storage_backend: StorageBackend::Sqlite,
            database_url: "sqlite://players.db".to_string(),
            database_max_connections: 5,
            database_connect_timeout_secs: 5,
            document_store_path: Some(PathBuf::from("players.json")),
            roster: Roster::default(),
            require_email: false,
            locale: Locale::Ar,
            public_dir: PathBuf::from("public"),
            request_timeout_secs: 30,
        }
    }
}

impl SantaConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`SantaError::Config`] if `LISTEN_ADDR` is set but cannot be
    /// parsed as a [`SocketAddr`], or if `ALLOWED_PLAYERS` yields no names.
    pub fn from_env() -> Result<Self, SantaError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`SantaConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SantaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mut listen_addr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|e| SantaError::Config(format!("invalid LISTEN_ADDR {raw:?}: {e}")))?,
            None => defaults.listen_addr,
        };
        if let Some(port) = parse_with(&lookup, "PORT") {
            listen_addr.set_port(port);
        }

        let roster = match lookup("ALLOWED_PLAYERS") {
            Some(list) => Roster::from_csv(&list),
            None => defaults.roster,
        };
        if roster.is_empty() {
            return Err(SantaError::Config(
                "ALLOWED_PLAYERS must name at least one player".to_string(),
            ));
        }

        let document_store_path = match lookup("DOCUMENT_STORE_PATH") {
            Some(p) if p.trim().is_empty() => None,
            Some(p) => Some(PathBuf::from(p)),
            None => defaults.document_store_path,
        };

        Ok(Self {
            listen_addr,
            storage_backend: parse_with(&lookup, "STORAGE_BACKEND")
                .unwrap_or(defaults.storage_backend),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_with(&lookup, "DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            database_connect_timeout_secs: parse_with(&lookup, "DATABASE_CONNECT_TIMEOUT_SECS")
                .unwrap_or(defaults.database_connect_timeout_secs),
            document_store_path,
            roster,
            require_email: parse_bool_with(&lookup, "REQUIRE_EMAIL")
                .unwrap_or(defaults.require_email),
            locale: parse_with(&lookup, "MESSAGE_LOCALE").unwrap_or(defaults.locale),
            public_dir: lookup("PUBLIC_DIR").map_or(defaults.public_dir, PathBuf::from),
            request_timeout_secs: parse_with(&lookup, "REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
        })
    }
}

/// Parses the value under `key` as `T`, returning `None` on missing or
/// invalid values.
fn parse_with<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

/// Parses the value under `key` as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `None` otherwise.
fn parse_bool_with<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key)?.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
