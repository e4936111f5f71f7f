use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

pub mod auth;
pub mod error;
pub mod events;
pub mod health;
pub mod jobs;
pub mod metrics;
pub mod rate_limit;
pub mod sweep;
pub mod tts;

const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Answer bare `OPTIONS` calls; CORS headers come from the CORS layer.
pub async fn preflight() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Function and admin routes bound to `state`, without transport layers.
pub fn router(state: AppState) -> Router {
    let functions = Router::new()
        .route(
            "/check-timeouts",
            post(sweep::check_timeouts).options(preflight),
        )
        .route(
            "/rate-limit",
            post(rate_limit::check_rate_limit).options(preflight),
        )
        .route(
            "/external-jobs",
            post(jobs::list_external_jobs).options(preflight),
        )
        .route(
            "/text-to-speech",
            post(tts::text_to_speech).options(preflight),
        )
        .route_layer(from_fn_with_state(state.clone(), auth::require_bearer));

    let admin = Router::new()
        .route("/events", get(events::stream_events))
        .route_layer(from_fn_with_state(
            state.clone(),
            auth::require_bearer_or_query,
        ));

    Router::new()
        .merge(functions)
        .merge(admin)
        .route("/health", get(health::health_check))
        .with_state(state)
}

/// Apply the HTTP layers shared by every route.
pub fn with_layers(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}
