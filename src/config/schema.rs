//! Configuration schema definitions.
//!
//! Mirrors the monitoring config file:
//!
//! ```yaml
//! service:
//!   base_url: "http://localhost:8000"
//! monitoring:
//!   request_timeout_seconds: 5
//!   check_interval_seconds: 10
//! logging:
//!   log_file: "logs/monitoring.log"
//!   metrics_file: "logs/metrics.jsonl"
//! thresholds:
//!   response_time_ms: { warning: 200, critical: 500 }
//!   error_rate_percent: { warning: 5, critical: 10 }
//!   consecutive_failures: { warning: 3, critical: 5 }
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the health monitor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Target service.
    pub service: ServiceConfig,

    /// Polling cadence and rolling-window settings.
    pub monitoring: MonitoringConfig,

    /// Append-only sink locations.
    pub logging: LoggingConfig,

    /// Alert thresholds.
    pub thresholds: ThresholdConfig,

    /// Process logging and metrics exposition.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Target service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL of the monitored service (e.g., "http://localhost:8000").
    pub base_url: String,

    /// Path probed on every cycle.
    #[serde(default = "default_health_path")]
    pub health_path: String,
}

fn default_health_path() -> String {
    "/health".to_string()
}

/// Polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitoringConfig {
    /// Per-request timeout in seconds.
    pub request_timeout_seconds: f64,

    /// Pause between the end of one cycle and the start of the next.
    pub check_interval_seconds: f64,

    /// Number of latency samples kept in the rolling window.
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,

    /// Emit an aggregate summary every N checks.
    #[serde(default = "default_summary_every")]
    pub summary_every: u64,

    /// Stop after this many checks. Unset means run until cancelled.
    #[serde(default)]
    pub max_checks: Option<u64>,

    /// Seed the rolling window from the metrics file on startup.
    #[serde(default)]
    pub warm_start: bool,
}

fn default_window_capacity() -> usize {
    crate::health::window::DEFAULT_CAPACITY
}

fn default_summary_every() -> u64 {
    5
}

impl MonitoringConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout_seconds)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs_f64(self.check_interval_seconds)
    }
}

/// Append-only sink locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// General observation log (JSON lines).
    pub log_file: PathBuf,

    /// Metrics-only stream (JSON lines).
    pub metrics_file: PathBuf,
}

/// Warning/critical pair for a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ThresholdBand<T> {
    pub warning: T,
    pub critical: T,
}

/// Alert thresholds, immutable for the run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ThresholdConfig {
    /// Latest response time, exceeded when strictly greater.
    pub response_time_ms: ThresholdBand<f64>,

    /// Cumulative error rate, exceeded when strictly greater.
    pub error_rate_percent: ThresholdBand<f64>,

    /// Failure streak, reached when greater or equal.
    pub consecutive_failures: ThresholdBand<u32>,
}

/// Log output format for the process logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,

    /// Human-readable or JSON process logs.
    pub log_format: LogFormat,

    /// Expose a Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Scrape endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9464".to_string(),
        }
    }
}
