use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::app_state::AppState;
use crate::config::FailurePolicy;
use crate::models::job::{JobsRequest, JobsResponse};
use crate::routes::error::ApiError;
use crate::services::jobs::{fetch_external_jobs_securely, try_fetch_external_jobs};

/// POST /external-jobs — list third-party jobs for a storefront category.
///
/// An empty body lists the default category.
pub async fn list_external_jobs(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<JobsResponse>, ApiError> {
    let request: JobsRequest = if body.iter().all(u8::is_ascii_whitespace) {
        JobsRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::Validation(e.to_string()))?
    };
    let category = request.category.as_deref();

    let jobs = match state.policies.jobs {
        FailurePolicy::Open => fetch_external_jobs_securely(state.backend.as_ref(), category).await,
        FailurePolicy::Closed => try_fetch_external_jobs(state.backend.as_ref(), category)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "External jobs fetch failed");
                ApiError::Upstream(e.to_string())
            })?,
    };

    Ok(Json(JobsResponse { jobs }))
}
