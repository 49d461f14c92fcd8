//! REST endpoint handlers.

pub mod register;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all endpoint routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(register::routes())
        .merge(system::routes())
}
