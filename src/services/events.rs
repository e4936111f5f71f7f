//! Typed publish/subscribe channel for back-office refreshes.
//!
//! Admin screens subscribe (over `GET /events`) and reload the affected
//! lists when an event arrives, instead of polling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdminEvent {
    /// A sweep moved missions into backup state.
    MissionsExpired { count: u64, at: DateTime<Utc> },
    /// A caller hit its rate limit.
    RateLimitTripped {
        identifier: String,
        action: String,
        at: DateTime<Utc>,
    },
}

impl AdminEvent {
    /// Event name used on the SSE stream.
    pub fn name(&self) -> &'static str {
        match self {
            AdminEvent::MissionsExpired { .. } => "missions_expired",
            AdminEvent::RateLimitTripped { .. } => "rate_limit_tripped",
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AdminEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish to every current subscriber and return how many received it.
    /// Having no subscribers is normal.
    pub fn publish(&self, event: AdminEvent) -> usize {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => {
                tracing::debug!(event = name, receivers, "Admin event published");
                receivers
            }
            Err(_) => 0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AdminEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
