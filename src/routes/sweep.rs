use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::app_state::AppState;
use crate::config::FailurePolicy;
use crate::models::mission::SweepResponse;
use crate::services::sweep::run_sweep;

/// POST /check-timeouts — move missions past their response deadline to backup.
///
/// Any request body is ignored.
pub async fn check_timeouts(State(state): State<AppState>) -> (StatusCode, Json<SweepResponse>) {
    match run_sweep(state.backend.as_ref(), &state.events).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(SweepResponse::completed(outcome.expired_missions)),
        ),
        Err(e) => match state.policies.sweep {
            FailurePolicy::Closed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SweepResponse::failed(e.to_string())),
            ),
            FailurePolicy::Open => (
                StatusCode::OK,
                Json(SweepResponse::skipped("backend unavailable")),
            ),
        },
    }
}
