use chrono::{DateTime, Duration, Utc};

use crate::config::FailurePolicy;
use crate::models::rate_limit::{RateLimitDecision, WindowStats};
use crate::services::backend::Backend;
use crate::services::events::{AdminEvent, EventBus};

/// Decide whether a new attempt fits in the sliding window.
///
/// `stats.attempt_count` excludes the attempt being checked. Once the window
/// is full, `retry_after` counts the seconds until the oldest attempt ages
/// out, never less than one.
pub fn evaluate_window(
    stats: &WindowStats,
    max_attempts: u32,
    window_minutes: u32,
    now: DateTime<Utc>,
) -> RateLimitDecision {
    if stats.attempt_count < max_attempts {
        return RateLimitDecision::allow();
    }

    let window = Duration::minutes(i64::from(window_minutes));
    // The oldest timestamp comes from the backend; a deadline that does not
    // fit in a DateTime falls back to the full window.
    let retry_after = stats
        .oldest_attempt_at
        .and_then(|oldest| oldest.checked_add_signed(window))
        .map(|deadline| deadline.signed_duration_since(now).num_seconds())
        .unwrap_or_else(|| window.num_seconds())
        .max(1);

    RateLimitDecision::deny(retry_after as u64)
}

/// Check an (identifier, action) pair against its limit.
///
/// Backend failures resolve according to `policy` and never propagate.
pub async fn check_limit(
    backend: &dyn Backend,
    events: &EventBus,
    identifier: &str,
    action: &str,
    max_attempts: u32,
    window_minutes: u32,
    policy: FailurePolicy,
) -> RateLimitDecision {
    let stats = match backend
        .rate_limit_window(identifier, action, window_minutes)
        .await
    {
        Ok(stats) => stats,
        Err(e) => {
            metrics::counter!("rate_limit_checks_total", "outcome" => "error").increment(1);
            tracing::warn!(
                identifier,
                action,
                error = %e,
                policy = %policy,
                "Rate limit backend unavailable"
            );
            return match policy {
                FailurePolicy::Open => RateLimitDecision::allow(),
                FailurePolicy::Closed => RateLimitDecision::unavailable(),
            };
        }
    };

    let decision = evaluate_window(&stats, max_attempts, window_minutes, Utc::now());

    if decision.allowed {
        metrics::counter!("rate_limit_checks_total", "outcome" => "allowed").increment(1);
    } else {
        metrics::counter!("rate_limit_checks_total", "outcome" => "denied").increment(1);
        tracing::info!(
            identifier,
            action,
            attempts = stats.attempt_count,
            max_attempts,
            retry_after = decision.retry_after,
            "Rate limit exceeded"
        );
        events.publish(AdminEvent::RateLimitTripped {
            identifier: identifier.to_string(),
            action: action.to_string(),
            at: Utc::now(),
        });
    }

    decision
}
