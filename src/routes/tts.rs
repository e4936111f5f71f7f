use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use garde::Validate;

use crate::app_state::AppState;
use crate::models::tts::{TtsRequest, TtsResponse};
use crate::routes::error::ApiError;
use crate::services::tts::TtsError;

/// POST /text-to-speech — synthesize speech and return base64 MP3.
pub async fn text_to_speech(
    State(state): State<AppState>,
    payload: Result<Json<TtsRequest>, JsonRejection>,
) -> Result<Json<TtsResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let client = state
        .tts
        .as_ref()
        .ok_or_else(|| ApiError::Internal(TtsError::NotConfigured.to_string()))?;

    metrics::counter!("tts_requests_total").increment(1);
    let start = std::time::Instant::now();

    let audio_content = client
        .synthesize_base64(&request.text, request.voice_id.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Text-to-speech generation failed");
            ApiError::Internal(e.to_string())
        })?;

    tracing::info!(
        chars = request.text.chars().count(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Speech generated"
    );

    Ok(Json(TtsResponse { audio_content }))
}
