//! secret-santa server entry point.
//!
//! Starts the Axum HTTP server with the registration endpoint and static
//! asset serving.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use secret_santa::api;
use secret_santa::app_state::AppState;
use secret_santa::config::SantaConfig;
use secret_santa::domain::{Messages, RandomPicker};
use secret_santa::persistence;
use secret_santa::service::RegistrationService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = SantaConfig::from_env().context("loading configuration")?;
    tracing::info!(
        addr = %config.listen_addr,
        backend = ?config.storage_backend,
        players = config.roster.len(),
        locale = %config.locale,
        "starting secret-santa"
    );

    // Build persistence layer
    let store = persistence::open_store(&config)
        .await
        .context("opening player store")?;

    // Build service layer
    let registration_service = RegistrationService::new(
        config.roster.clone(),
        store,
        Arc::new(RandomPicker),
        Messages::new(config.locale),
    )
    .with_required_email(config.require_email);

    // Build router
    let app = api::build_app(
        AppState::new(registration_service),
        &config.public_dir,
        Duration::from_secs(config.request_timeout_secs),
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
