use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use bikawo_functions::app_state::AppState;
use bikawo_functions::config::AppConfig;
use bikawo_functions::routes;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing bikawo-functions server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    // Register application metrics
    metrics::describe_counter!("mission_sweeps_total", "Mission timeout sweeps run");
    metrics::describe_counter!(
        "missions_expired_total",
        "Missions moved to backup after their response deadline"
    );
    metrics::describe_counter!(
        "mission_sweep_failures_total",
        "Mission timeout sweeps that failed to reach the backend"
    );
    metrics::describe_histogram!(
        "mission_sweep_duration_seconds",
        "Time spent in the check_mission_timeouts backend call"
    );
    metrics::describe_counter!(
        "rate_limit_checks_total",
        "Rate limit checks by outcome (allowed, denied, error)"
    );
    metrics::describe_counter!(
        "external_jobs_requests_total",
        "External jobs proxy requests by outcome"
    );
    metrics::describe_counter!("tts_requests_total", "Text-to-speech generations requested");

    tracing::info!(
        backend_url = %config.backend_url,
        sweep_policy = %config.sweep_failure_policy,
        rate_limit_policy = %config.rate_limit_failure_policy,
        jobs_policy = %config.jobs_failure_policy,
        "Initializing backend client"
    );
    let state = AppState::from_config(&config).expect("Failed to initialize application state");

    let app = routes::with_layers(
        routes::router(state)
            // Prometheus metrics endpoint (separate state)
            .route(
                "/metrics",
                get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
            ),
    );

    tracing::info!("Starting bikawo-functions on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
