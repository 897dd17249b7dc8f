//! Alert severity classification.
//!
//! # Rules
//! ```text
//! CRITICAL: latency > critical  OR  error_rate > critical  OR  streak >= critical
//! WARNING:  latency > warning   OR  error_rate > warning   OR  streak >= warning
//! NORMAL:   otherwise
//! ```
//!
//! # Design Decisions
//! - Metrics are OR'd: one critical crossing is enough
//! - No latency sample yet means insufficient data, reported as NORMAL
//! - No hysteresis: each cycle is classified from scratch

use std::fmt;

use crate::config::ThresholdConfig;

/// Discrete alert level, ordered by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    /// Console marker.
    pub fn marker(self) -> &'static str {
        match self {
            Severity::Normal => "🟢",
            Severity::Warning => "🟡",
            Severity::Critical => "🔴",
        }
    }

    /// Numeric level for gauges.
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Normal => "NORMAL",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

/// Classify current health against the configured thresholds.
///
/// `latest_latency_ms` is the newest sample in the rolling window; `None`
/// short-circuits to [`Severity::Normal`].
pub fn classify(
    latest_latency_ms: Option<f64>,
    error_rate_percent: f64,
    consecutive_failures: u32,
    thresholds: &ThresholdConfig,
) -> Severity {
    let Some(latency_ms) = latest_latency_ms else {
        return Severity::Normal;
    };

    let latency = &thresholds.response_time_ms;
    let errors = &thresholds.error_rate_percent;
    let failures = &thresholds.consecutive_failures;

    if latency_ms > latency.critical
        || error_rate_percent > errors.critical
        || consecutive_failures >= failures.critical
    {
        Severity::Critical
    } else if latency_ms > latency.warning
        || error_rate_percent > errors.warning
        || consecutive_failures >= failures.warning
    {
        Severity::Warning
    } else {
        Severity::Normal
    }
}
