//! Registration endpoint handler.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{RegisterRequest, RegisterResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, SantaError};

/// `POST /register` — Register a participant and assign a receiver.
///
/// # Errors
///
/// Returns [`SantaError`] when the body is not valid JSON, the name is not
/// allowed or already registered, no receiver is left, or storage fails.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Registration",
    summary = "Register a participant",
    description = "Registers an allow-listed name and assigns it a random receiver that is not the registrant and has not been assigned before.",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered; receiver assigned", body = RegisterResponse),
        (status = 400, description = "Malformed body, name not allowed, already registered, email missing, or all names distributed", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, SantaError> {
    let Json(req) = payload?;
    let registration = state
        .registration_service
        .register(req.name(), req.email.as_deref())
        .await?;

    Ok(Json(registration.into()))
}

/// Registration routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/register", post(register))
}
