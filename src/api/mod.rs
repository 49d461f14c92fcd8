//! REST API layer: route handlers, DTOs, and router composition.
//!
//! `POST /register` and `GET /health` are mounted at the root; every
//! other path falls through to the static asset directory.

pub mod dto;
pub mod handlers;
pub mod openapi;

use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = handlers::routes();

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
}

/// Builds the complete application: API routes, static asset fallback
/// from `public_dir`, and the HTTP layers (tracing, CORS, timeout).
pub fn build_app(state: AppState, public_dir: &Path, request_timeout: Duration) -> Router {
    Router::new()
        .merge(build_router())
        .fallback_service(ServeDir::new(public_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
        .with_state(state)
}
