use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle state of a booked mission. Transitions are applied by the
/// backend; the sweep logs the state it escalates from
/// (`services::sweep::ESCALATED_STATUS`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, EnumString, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MissionStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl MissionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, MissionStatus::Completed | MissionStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: MissionStatus) -> bool {
        use MissionStatus::*;
        match (self, next) {
            (Pending, Confirmed) | (Confirmed, InProgress) | (InProgress, Completed) => true,
            (current, Cancelled) => !current.is_terminal(),
            _ => false,
        }
    }
}

/// Response body of `POST /check-timeouts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SweepResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_missions: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SweepResponse {
    pub fn completed(expired_missions: u64) -> Self {
        Self {
            success: true,
            expired_missions: Some(expired_missions),
            message: Some(format!(
                "{} mission(s) moved to backup after response timeout",
                expired_missions
            )),
            error: None,
        }
    }

    pub fn skipped(reason: &str) -> Self {
        Self {
            success: true,
            expired_missions: Some(0),
            message: Some(format!("Sweep skipped: {}", reason)),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            expired_missions: None,
            message: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_forward_lifecycle() {
        assert!(MissionStatus::Pending.can_transition_to(MissionStatus::Confirmed));
        assert!(MissionStatus::Confirmed.can_transition_to(MissionStatus::InProgress));
        assert!(MissionStatus::InProgress.can_transition_to(MissionStatus::Completed));
        assert!(!MissionStatus::Pending.can_transition_to(MissionStatus::Completed));
        assert!(!MissionStatus::Completed.can_transition_to(MissionStatus::Pending));
    }

    #[test]
    fn test_cancel_only_from_open_states() {
        assert!(MissionStatus::Pending.can_transition_to(MissionStatus::Cancelled));
        assert!(MissionStatus::InProgress.can_transition_to(MissionStatus::Cancelled));
        assert!(!MissionStatus::Completed.can_transition_to(MissionStatus::Cancelled));
        assert!(!MissionStatus::Cancelled.can_transition_to(MissionStatus::Cancelled));
    }

    #[test]
    fn test_status_names() {
        assert_eq!(MissionStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            MissionStatus::from_str("in_progress").unwrap(),
            MissionStatus::InProgress
        );
    }

    #[test]
    fn test_sweep_response_shape() {
        let body = serde_json::to_value(SweepResponse::completed(0)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["expiredMissions"], 0);
        assert!(body.get("error").is_none());

        let body = serde_json::to_value(SweepResponse::failed("boom".into())).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "boom");
        assert!(body.get("expiredMissions").is_none());
    }
}
