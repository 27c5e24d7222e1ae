//! Bounded in-memory telemetry collection with naive per-client rate
//! limiting. No transport: callers feed events in and read snapshots out.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Maximum accepted category length.
const MAX_CATEGORY_LEN: usize = 64;

/// A usage event submitted by a client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Short event category, at most 64 characters.
    pub category: String,
    /// Arbitrary event payload.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Bounded event queue with one-event-per-window rate limiting per client.
#[derive(Debug)]
pub struct TelemetryStore {
    max_events: usize,
    rate_limit: Duration,
    events: VecDeque<TelemetryEvent>,
    last_event_by_client: HashMap<String, Instant>,
}

impl TelemetryStore {
    /// Create a store keeping at most `max_events`, accepting at most one
    /// event per client per `rate_limit` window.
    pub fn new(max_events: usize, rate_limit: Duration) -> Self {
        Self {
            max_events,
            rate_limit,
            events: VecDeque::with_capacity(max_events.min(1024)),
            last_event_by_client: HashMap::new(),
        }
    }

    /// Store an event if it passes validation and the rate limit.
    ///
    /// Returns `true` when the event was accepted.
    pub fn record(&mut self, event: TelemetryEvent, client: &str) -> bool {
        if event.category.is_empty() || event.category.len() > MAX_CATEGORY_LEN {
            return false;
        }

        let now = Instant::now();
        if let Some(last) = self.last_event_by_client.get(client)
            && now.duration_since(*last) < self.rate_limit
        {
            return false;
        }
        self.last_event_by_client.insert(client.to_string(), now);

        if self.events.len() == self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
        true
    }

    /// Copy of the stored events, oldest first.
    pub fn snapshot(&self) -> Vec<TelemetryEvent> {
        self.events.iter().cloned().collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/telemetry.rs"]
mod tests;
