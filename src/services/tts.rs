use base64::Engine;
use reqwest::Client;
use std::time::Duration;

const TTS_MODEL: &str = "eleven_multilingual_v2";

/// Client for the text-to-speech provider.
pub struct TtsClient {
    http: Client,
    api_url: String,
    api_key: String,
    default_voice: String,
}

impl TtsClient {
    pub fn new(
        api_url: &str,
        api_key: &str,
        default_voice: &str,
        timeout: Duration,
    ) -> Result<Self, TtsError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            default_voice: default_voice.to_string(),
        })
    }

    fn endpoint(&self, voice_id: Option<&str>) -> String {
        format!(
            "{}/text-to-speech/{}",
            self.api_url,
            voice_id.unwrap_or(&self.default_voice)
        )
    }

    /// Synthesize `text` and return MP3 bytes.
    pub async fn synthesize(&self, text: &str, voice_id: Option<&str>) -> Result<Vec<u8>, TtsError> {
        let response = self
            .http
            .post(self.endpoint(voice_id))
            .header("xi-api-key", &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&serde_json::json!({
                "text": text,
                "model_id": TTS_MODEL,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }
        Ok(audio.to_vec())
    }

    /// Synthesize and base64-encode for a JSON response.
    pub async fn synthesize_base64(
        &self,
        text: &str,
        voice_id: Option<&str>,
    ) -> Result<String, TtsError> {
        let audio = self.synthesize(text, voice_id).await?;
        Ok(base64::engine::general_purpose::STANDARD.encode(audio))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    #[error("Text-to-speech is not configured")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Text-to-speech provider returned status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Text-to-speech provider returned no audio")]
    EmptyAudio,
}
