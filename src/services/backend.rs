use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::models::job::ExternalJob;
use crate::models::rate_limit::WindowStats;

const SWEEP_RPC: &str = "/rest/v1/rpc/check_mission_timeouts";
const RATE_LIMIT_RPC: &str = "/rest/v1/rpc/check_rate_limit";
const EXTERNAL_JOBS_FUNCTION: &str = "/functions/v1/external-jobs";

/// Operations the managed backend exposes to these functions.
///
/// Locking, atomicity and counter storage all live behind this trait.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Flip every mission past its response deadline into backup state and
    /// return how many were affected. Safe to call repeatedly.
    async fn check_mission_timeouts(&self) -> Result<u64, BackendError>;

    /// Record an attempt for (identifier, action) and return the window it
    /// falls into.
    async fn rate_limit_window(
        &self,
        identifier: &str,
        action: &str,
        window_minutes: u32,
    ) -> Result<WindowStats, BackendError>;

    /// Ask the backend function holding the platform credentials for jobs
    /// in an already translated category.
    async fn fetch_external_jobs(&self, category: &str) -> Result<Vec<ExternalJob>, BackendError>;

    async fn health_check(&self) -> Result<(), BackendError>;
}

/// Client for the Supabase-style REST + edge function backend.
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    service_key: String,
}

/// `{jobs: [...]}` as returned by the jobs function, records still raw.
#[derive(Deserialize)]
struct JobsEnvelope {
    #[serde(default)]
    jobs: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WindowPayload {
    One(WindowStats),
    Rows(Vec<WindowStats>),
}

impl SupabaseClient {
    pub fn new(base_url: &str, service_key: &str, timeout: Duration) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bikawo-functions/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        })
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(format!("{}{}", self.base_url, path))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl Backend for SupabaseClient {
    async fn check_mission_timeouts(&self) -> Result<u64, BackendError> {
        let response = self
            .post(SWEEP_RPC)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        // The procedure returns a bare integer; `null` means nothing expired.
        let count: Option<i64> = Self::read_json(response).await?;
        Ok(count.map(|n| u64::try_from(n).unwrap_or(0)).unwrap_or(0))
    }

    async fn rate_limit_window(
        &self,
        identifier: &str,
        action: &str,
        window_minutes: u32,
    ) -> Result<WindowStats, BackendError> {
        let response = self
            .post(RATE_LIMIT_RPC)
            .json(&serde_json::json!({
                "p_identifier": identifier,
                "p_action": action,
                "p_window_minutes": window_minutes,
            }))
            .send()
            .await?;

        match Self::read_json::<WindowPayload>(response).await? {
            WindowPayload::One(stats) => Ok(stats),
            WindowPayload::Rows(rows) => Ok(rows.into_iter().next().unwrap_or_default()),
        }
    }

    async fn fetch_external_jobs(&self, category: &str) -> Result<Vec<ExternalJob>, BackendError> {
        let response = self
            .post(EXTERNAL_JOBS_FUNCTION)
            .json(&serde_json::json!({ "category": category }))
            .send()
            .await?;

        let body: JobsEnvelope = Self::read_json(response).await?;
        Ok(ExternalJob::decode_page(body.jobs))
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        let response = self
            .http
            .get(format!("{}/rest/v1/", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        if response.status().is_server_error() {
            return Err(BackendError::Status {
                status: response.status().as_u16(),
                body: String::new(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },
}
