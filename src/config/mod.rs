use serde::Deserialize;
use strum::{Display, EnumString};

/// What an endpoint answers when the managed backend cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FailurePolicy {
    /// Answer permissively (allow the request, return an empty list).
    Open,
    /// Surface the failure to the caller.
    Closed,
}

/// Failure policy per endpoint, resolved from [`AppConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePolicies {
    pub sweep: FailurePolicy,
    pub rate_limit: FailurePolicy,
    pub jobs: FailurePolicy,
}

impl Default for FailurePolicies {
    fn default() -> Self {
        Self {
            sweep: FailurePolicy::Closed,
            rate_limit: FailurePolicy::Open,
            jobs: FailurePolicy::Open,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:3000"). Unused by the one-shot sweep.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Managed backend base URL (REST and edge functions live under it)
    pub backend_url: String,

    /// Service-role key sent as `apikey` and bearer token
    pub backend_service_key: String,

    /// Text-to-speech API key. TTS requests fail when unset.
    pub tts_api_key: Option<String>,

    #[serde(default = "default_tts_api_url")]
    pub tts_api_url: String,

    #[serde(default = "default_tts_voice_id")]
    pub tts_voice_id: String,

    /// HS256 secret for caller JWTs. Function routes are open when unset.
    pub jwt_secret: Option<String>,

    /// Timeout applied to every outbound HTTP call
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_sweep_policy")]
    pub sweep_failure_policy: FailurePolicy,

    #[serde(default = "default_rate_limit_policy")]
    pub rate_limit_failure_policy: FailurePolicy,

    #[serde(default = "default_jobs_policy")]
    pub jobs_failure_policy: FailurePolicy,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_tts_api_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_tts_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_http_timeout_secs() -> u64 {
    15
}

fn default_sweep_policy() -> FailurePolicy {
    FailurePolicies::default().sweep
}

fn default_rate_limit_policy() -> FailurePolicy {
    FailurePolicies::default().rate_limit
}

fn default_jobs_policy() -> FailurePolicy {
    FailurePolicies::default().jobs
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    pub fn failure_policies(&self) -> FailurePolicies {
        FailurePolicies {
            sweep: self.sweep_failure_policy,
            rate_limit: self.rate_limit_failure_policy,
            jobs: self.jobs_failure_policy,
        }
    }

    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn vars(extra: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut vars = vec![
            ("BACKEND_URL".to_string(), "https://project.example.co".to_string()),
            ("BACKEND_SERVICE_KEY".to_string(), "service-key".to_string()),
        ];
        vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        vars
    }

    #[test]
    fn test_defaults_applied() {
        let config: AppConfig = envy::from_iter(vars(&[])).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.http_timeout_secs, 15);
        assert!(config.tts_api_key.is_none());
        assert!(config.jwt_secret.is_none());
        assert_eq!(config.failure_policies(), FailurePolicies::default());
    }

    #[test]
    fn test_default_policies_match_endpoint_semantics() {
        let policies = FailurePolicies::default();
        assert_eq!(policies.sweep, FailurePolicy::Closed);
        assert_eq!(policies.rate_limit, FailurePolicy::Open);
        assert_eq!(policies.jobs, FailurePolicy::Open);
    }

    #[test]
    fn test_policy_override() {
        let config: AppConfig = envy::from_iter(vars(&[
            ("RATE_LIMIT_FAILURE_POLICY", "closed"),
            ("SWEEP_FAILURE_POLICY", "open"),
        ]))
        .unwrap();
        let policies = config.failure_policies();
        assert_eq!(policies.rate_limit, FailurePolicy::Closed);
        assert_eq!(policies.sweep, FailurePolicy::Open);
        assert_eq!(policies.jobs, FailurePolicy::Open);
    }

    #[test]
    fn test_missing_backend_url_is_error() {
        let result: Result<AppConfig, _> = envy::from_iter(vec![(
            "BACKEND_SERVICE_KEY".to_string(),
            "service-key".to_string(),
        )]);
        assert!(result.is_err());
    }

    #[test]
    fn test_policy_display_roundtrip() {
        assert_eq!(FailurePolicy::Open.to_string(), "open");
        assert_eq!(FailurePolicy::from_str("closed").unwrap(), FailurePolicy::Closed);
    }
}
