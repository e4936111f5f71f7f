use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

/// Request body of `POST /rate-limit`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRequest {
    #[garde(length(min = 1, max = 255))]
    pub identifier: String,

    #[garde(length(min = 1, max = 255))]
    pub action: String,

    #[serde(default = "default_max_attempts")]
    #[garde(range(min = 1, max = 10_000))]
    pub max_attempts: u32,

    #[serde(default = "default_window_minutes")]
    #[garde(range(min = 1, max = 10_080))]
    pub window_minutes: u32,
}

pub fn default_max_attempts() -> u32 {
    5
}

pub fn default_window_minutes() -> u32 {
    60
}

/// Attempts recorded by the backend for one (identifier, action) window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WindowStats {
    /// Attempts already in the window, not counting the current one.
    #[serde(default)]
    pub attempt_count: u32,
    #[serde(default)]
    pub oldest_attempt_at: Option<DateTime<Utc>>,
}

/// Allow/deny answer returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Seconds until another attempt is accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RateLimitDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            retry_after: None,
            message: None,
        }
    }

    pub fn deny(retry_after: u64) -> Self {
        let minutes = retry_after.div_ceil(60).max(1);
        Self {
            allowed: false,
            retry_after: Some(retry_after),
            message: Some(format!(
                "Trop de tentatives. Veuillez réessayer dans {} minute(s).",
                minutes
            )),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            allowed: false,
            retry_after: None,
            message: Some("Service temporairement indisponible.".to_string()),
        }
    }
}
