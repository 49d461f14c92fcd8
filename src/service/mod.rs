//! Service layer: business logic orchestration.
//!
//! [`RegistrationService`] validates registrants against the
//! [`super::domain::Roster`], picks receivers and persists the result
//! through a [`super::persistence::PlayerStore`].

pub mod registration_service;

pub use registration_service::{Registration, RegistrationService};
