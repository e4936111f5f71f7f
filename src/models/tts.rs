use garde::Validate;
use serde::{Deserialize, Serialize};

/// Request body of `POST /text-to-speech`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest {
    #[garde(length(min = 1, max = 5000))]
    pub text: String,

    #[garde(length(min = 1, max = 64))]
    pub voice_id: Option<String>,
}

/// Base64-encoded MP3 audio.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsResponse {
    pub audio_content: String,
}
