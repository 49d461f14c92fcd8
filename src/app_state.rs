//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::RegistrationService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registration service for all business logic.
    pub registration_service: Arc<RegistrationService>,
}

impl AppState {
    /// Wraps a service for sharing across handlers.
    #[must_use]
    pub fn new(registration_service: RegistrationService) -> Self {
        Self {
            registration_service: Arc::new(registration_service),
        }
    }
}
