//! Registration records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted registration: `name` gives a gift to `receiver`.
///
/// Records are created once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Store-assigned identifier.
    pub id: i64,
    /// The registrant.
    pub name: String,
    /// Optional contact address, unique across records when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// The name this registrant gives a gift to.
    pub receiver: String,
    /// When the registration was stored.
    pub registered_at: DateTime<Utc>,
}

/// A registration that has passed validation but is not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    /// The registrant.
    pub name: String,
    /// Optional contact address.
    pub email: Option<String>,
    /// The assigned receiver.
    pub receiver: String,
}

impl NewPlayer {
    /// Turns this into a stored record with the given id and timestamp.
    #[must_use]
    pub fn into_record(self, id: i64, registered_at: DateTime<Utc>) -> PlayerRecord {
        PlayerRecord {
            id,
            name: self.name,
            email: self.email,
            receiver: self.receiver,
            registered_at,
        }
    }
}

/// Trims an optional email and treats an empty value as absent.
#[must_use]
pub fn normalize_email(email: Option<&str>) -> Option<String> {
    email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(ToString::to_string)
}
