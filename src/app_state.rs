use std::sync::Arc;

use crate::config::{AppConfig, FailurePolicies};
use crate::services::{
    auth::JwtVerifier,
    backend::{Backend, BackendError, SupabaseClient},
    events::EventBus,
    tts::{TtsClient, TtsError},
};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub tts: Option<Arc<TtsClient>>,
    pub events: EventBus,
    pub policies: FailurePolicies,
    pub jwt: Option<Arc<JwtVerifier>>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>, policies: FailurePolicies) -> Self {
        Self {
            backend,
            tts: None,
            events: EventBus::default(),
            policies,
            jwt: None,
        }
    }

    pub fn with_tts(mut self, tts: TtsClient) -> Self {
        self.tts = Some(Arc::new(tts));
        self
    }

    pub fn with_jwt(mut self, verifier: JwtVerifier) -> Self {
        self.jwt = Some(Arc::new(verifier));
        self
    }

    /// Build the production state from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let backend = SupabaseClient::new(
            &config.backend_url,
            &config.backend_service_key,
            config.http_timeout(),
        )?;
        let mut state = Self::new(Arc::new(backend), config.failure_policies());

        if let Some(api_key) = config.tts_api_key.as_deref() {
            state = state.with_tts(TtsClient::new(
                &config.tts_api_url,
                api_key,
                &config.tts_voice_id,
                config.http_timeout(),
            )?);
        } else {
            tracing::warn!("TTS_API_KEY not set, text-to-speech requests will fail");
        }

        if let Some(secret) = config.jwt_secret.as_deref() {
            state = state.with_jwt(JwtVerifier::new(secret));
        } else {
            tracing::warn!("JWT_SECRET not set, function routes accept unauthenticated calls");
        }

        Ok(state)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to initialize backend client: {0}")]
    Backend(#[from] BackendError),

    #[error("Failed to initialize text-to-speech client: {0}")]
    Tts(#[from] TtsError),
}
