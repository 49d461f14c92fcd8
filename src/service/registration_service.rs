//! Registration service: validates registrants and assigns receivers.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Messages, NewPlayer, ReceiverPicker, Roster, normalize_email};
use crate::error::SantaError;
use crate::persistence::PlayerStore;

/// A successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Localized confirmation embedding the receiver.
    pub message: String,
    /// The name the registrant gives a gift to.
    pub receiver: String,
}

/// Orchestration layer for registrations.
///
/// Owns the allow-list, the store handle, the receiver picker and the
/// message catalog. Every registration follows the pattern: validate →
/// acquire lock → read assignments → pick → insert → respond.
///
/// # Concurrency
///
/// Registrations are serialized through an internal mutex spanning the
/// read of existing assignments and the insert, so one process never
/// hands out the same receiver twice.
#[derive(Debug)]
pub struct RegistrationService {
    roster: Roster,
    store: Arc<dyn PlayerStore>,
    picker: Arc<dyn ReceiverPicker>,
    messages: Messages,
    require_email: bool,
    lock: Mutex<()>,
}

impl RegistrationService {
    /// Creates a new `RegistrationService`.
    #[must_use]
    pub fn new(
        roster: Roster,
        store: Arc<dyn PlayerStore>,
        picker: Arc<dyn ReceiverPicker>,
        messages: Messages,
    ) -> Self {
        Self {
            roster,
            store,
            picker,
            messages,
            require_email: false,
            lock: Mutex::new(()),
        }
    }

    /// Makes `email` mandatory for every registration.
    #[must_use]
    pub fn with_required_email(mut self, require_email: bool) -> Self {
        self.require_email = require_email;
        self
    }

    /// Returns the allow-list.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn PlayerStore> {
        &self.store
    }

    /// Registers `name` and assigns a receiver.
    ///
    /// # Errors
    ///
    /// - [`SantaError::InvalidName`] if `name` is not on the allow-list.
    /// - [`SantaError::EmailRequired`] if an email is mandatory and missing.
    /// - [`SantaError::AlreadyRegistered`] if `name` already has a record.
    /// - [`SantaError::Exhausted`] if no receiver is left for `name`.
    /// - [`SantaError::PersistenceError`] if the store fails.
    pub async fn register(
        &self,
        name: &str,
        email: Option<&str>,
    ) -> Result<Registration, SantaError> {
        if !self.roster.contains(name) {
            tracing::warn!(player = name, "registration rejected: name not allowed");
            return Err(SantaError::InvalidName(
                self.messages.invalid_name().to_string(),
            ));
        }

        let email = normalize_email(email);
        if self.require_email && email.is_none() {
            tracing::warn!(player = name, "registration rejected: email missing");
            return Err(SantaError::EmailRequired(
                self.messages.email_required().to_string(),
            ));
        }

        let _guard = self.lock.lock().await;

        if self.store.find_by_name(name).await?.is_some() {
            tracing::warn!(player = name, "registration rejected: already registered");
            return Err(SantaError::AlreadyRegistered(
                self.messages.already_registered().to_string(),
            ));
        }

        let players = self.store.list_all().await?;
        let available = self
            .roster
            .available_receivers(name, players.iter().map(|p| p.receiver.as_str()));

        let Some(receiver) = self.picker.pick(&available) else {
            tracing::warn!(
                player = name,
                registered = players.len(),
                "registration rejected: no receivers left"
            );
            return Err(SantaError::Exhausted(self.messages.exhausted().to_string()));
        };

        let record = self
            .store
            .insert(NewPlayer {
                name: name.to_string(),
                email,
                receiver,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(player = name, error = %e, "failed to store registration");
            })?;

        tracing::info!(id = record.id, player = name, "player registered");
        Ok(Registration {
            message: self.messages.registered(&record.receiver),
            receiver: record.receiver,
        })
    }

    /// Number of registrations and of receivers nobody has been assigned yet.
    ///
    /// # Errors
    ///
    /// Returns [`SantaError::PersistenceError`] if the store fails.
    pub async fn progress(&self) -> Result<(usize, usize), SantaError> {
        let players = self.store.list_all().await?;
        let assigned: HashSet<&str> = players.iter().map(|p| p.receiver.as_str()).collect();
        let unassigned = self
            .roster
            .names()
            .iter()
            .filter(|n| !assigned.contains(n.as_str()))
            .count();
        Ok((players.len(), unassigned))
    }
}
