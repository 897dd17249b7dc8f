//! Check counters.
//!
//! # Responsibilities
//! - Count total checks and errors for the process lifetime
//! - Track the current consecutive-failure streak
//!
//! # Design Decisions
//! - A transport failure and any non-200 status are both errors
//! - The streak resets only on a 200 response
//! - Counters start at zero and are never reset while running

use crate::health::outcome::Outcome;

/// Monotonic per-process check counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total_checks: u64,
    pub error_count: u64,
    pub consecutive_failures: u32,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one check outcome into the counters.
    pub fn record_outcome(&mut self, outcome: &Outcome) {
        self.total_checks += 1;

        if outcome.is_healthy() {
            self.consecutive_failures = 0;
        } else {
            self.error_count += 1;
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        }
    }

    /// `error_count / total_checks * 100`, or 0 before the first check.
    pub fn error_rate_percent(&self) -> f64 {
        if self.total_checks == 0 {
            return 0.0;
        }
        self.error_count as f64 / self.total_checks as f64 * 100.0
    }
}
