use chrono::Utc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::models::mission::MissionStatus;
use crate::services::backend::{Backend, BackendError};
use crate::services::events::{AdminEvent, EventBus};

/// Missions still in this state when their response deadline passes are the
/// ones the backend hands to a backup provider.
pub const ESCALATED_STATUS: MissionStatus = MissionStatus::Pending;

/// Result of one successful sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    pub expired_missions: u64,
    pub duration: Duration,
}

/// Run a single mission-timeout sweep.
///
/// Exactly one backend call, no retry: the next scheduled invocation covers
/// transient failures.
pub async fn run_sweep(backend: &dyn Backend, events: &EventBus) -> Result<SweepOutcome, BackendError> {
    let sweep_id = Uuid::new_v4();
    tracing::info!(
        sweep_id = %sweep_id,
        status = %ESCALATED_STATUS,
        "Checking mission timeouts"
    );

    let start = Instant::now();
    let result = backend.check_mission_timeouts().await;
    let duration = start.elapsed();

    metrics::counter!("mission_sweeps_total").increment(1);
    metrics::histogram!("mission_sweep_duration_seconds").record(duration.as_secs_f64());

    match result {
        Ok(expired_missions) => {
            metrics::counter!("missions_expired_total").increment(expired_missions);
            tracing::info!(
                sweep_id = %sweep_id,
                status = %ESCALATED_STATUS,
                expired_missions,
                duration_ms = duration.as_millis() as u64,
                "Mission timeout sweep complete"
            );

            if expired_missions > 0 {
                events.publish(AdminEvent::MissionsExpired {
                    count: expired_missions,
                    at: Utc::now(),
                });
            }

            Ok(SweepOutcome {
                expired_missions,
                duration,
            })
        }
        Err(e) => {
            metrics::counter!("mission_sweep_failures_total").increment(1);
            tracing::error!(
                sweep_id = %sweep_id,
                error = %e,
                duration_ms = duration.as_millis() as u64,
                "Mission timeout sweep failed"
            );
            Err(e)
        }
    }
}
