//! Rolling state carried between cycles.

use chrono::{DateTime, Utc};

use crate::health::{Counters, Outcome, RollingWindow};
use crate::recording::Observation;

/// Everything one monitored target accumulates over its lifetime.
///
/// Owned exclusively by the monitor loop; never shared.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    pub window: RollingWindow,
    pub counters: Counters,
}

impl MonitorState {
    pub fn new(window_capacity: usize) -> Self {
        Self {
            window: RollingWindow::new(window_capacity),
            counters: Counters::new(),
        }
    }

    /// Start with a window seeded from earlier latencies. Counters still
    /// start at zero.
    pub fn warm(window_capacity: usize, latencies: impl IntoIterator<Item = f64>) -> Self {
        let mut state = Self::new(window_capacity);
        state.window.extend(latencies);
        state
    }

    /// Fold `outcome` into the window and counters, then snapshot the
    /// updated figures as an observation.
    pub fn observe(&mut self, timestamp: DateTime<Utc>, endpoint: &str, outcome: Outcome) -> Observation {
        if let Some(latency_ms) = outcome.latency_ms() {
            self.window.append(latency_ms);
        }
        self.counters.record_outcome(&outcome);

        Observation::capture(timestamp, endpoint, outcome, &self.window, &self.counters)
    }
}
