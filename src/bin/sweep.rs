//! Run one mission-timeout sweep and exit.
//!
//! Intended for cron entries that prefer a process over an HTTP call. Exits
//! with status 1 when the backend call fails.

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use bikawo_functions::{
    config::AppConfig,
    services::{backend::SupabaseClient, events::EventBus, sweep::run_sweep},
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let backend = match SupabaseClient::new(
        &config.backend_url,
        &config.backend_service_key,
        config.http_timeout(),
    ) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize backend client");
            return ExitCode::FAILURE;
        }
    };

    // No subscribers outside the server; events are dropped.
    let events = EventBus::default();

    match run_sweep(&backend, &events).await {
        Ok(outcome) => {
            tracing::info!(
                expired_missions = outcome.expired_missions,
                duration_ms = outcome.duration.as_millis() as u64,
                "One-shot sweep finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "One-shot sweep failed");
            ExitCode::FAILURE
        }
    }
}
