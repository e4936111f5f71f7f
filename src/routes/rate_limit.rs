use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use garde::Validate;

use crate::app_state::AppState;
use crate::models::rate_limit::{RateLimitDecision, RateLimitRequest};
use crate::routes::error::ApiError;
use crate::services::rate_limit::check_limit;

/// POST /rate-limit — allow or deny an attempt for (identifier, action).
pub async fn check_rate_limit(
    State(state): State<AppState>,
    payload: Result<Json<RateLimitRequest>, JsonRejection>,
) -> Result<Json<RateLimitDecision>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let decision = check_limit(
        state.backend.as_ref(),
        &state.events,
        &request.identifier,
        &request.action,
        request.max_attempts,
        request.window_minutes,
        state.policies.rate_limit,
    )
    .await;

    Ok(Json(decision))
}
