//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the probe, recorder and reporter from validated configuration
//! - Optionally warm the rolling window from the metrics stream
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Counters always start at zero, even on warm start

use thiserror::Error;

use crate::config::MonitorConfig;
use crate::health::{HttpProbe, ProbeError};
use crate::monitor::{ConsoleReporter, LoopSettings, MonitorLoop, MonitorState, Reporter};
use crate::recording::{read_records, recent_latencies, RecordError, Recorder};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build health probe: {0}")]
    Probe(#[from] ProbeError),

    #[error("failed to warm start from metrics file: {0}")]
    WarmStart(#[from] RecordError),
}

/// Initial rolling state, warmed from the metrics file when configured.
pub fn initial_state(config: &MonitorConfig) -> Result<MonitorState, RecordError> {
    let capacity = config.monitoring.window_capacity;
    if !config.monitoring.warm_start {
        return Ok(MonitorState::new(capacity));
    }

    let records = read_records(&config.logging.metrics_file)?;
    let latencies = recent_latencies(&records, capacity);
    tracing::info!(
        path = %config.logging.metrics_file.display(),
        records = records.len(),
        samples = latencies.len(),
        "Warm-starting latency window"
    );
    Ok(MonitorState::warm(capacity, latencies))
}

/// Assemble a monitor loop around an arbitrary reporter.
pub fn build_monitor_with<R: Reporter>(
    config: &MonitorConfig,
    reporter: R,
) -> Result<MonitorLoop<HttpProbe, R>, StartupError> {
    let probe = HttpProbe::new(&config.service, config.monitoring.request_timeout())?;
    tracing::info!(url = %probe.url(), "Health probe ready");

    let state = initial_state(config)?;
    let recorder = Recorder::from_config(&config.logging);

    Ok(MonitorLoop::new(
        probe,
        recorder,
        reporter,
        LoopSettings::from_config(config),
        state,
    ))
}

/// Assemble the production monitor loop printing to the console.
pub fn build_monitor(config: &MonitorConfig) -> Result<MonitorLoop<HttpProbe, ConsoleReporter>, StartupError> {
    let reporter = ConsoleReporter::new(&config.logging.log_file, &config.logging.metrics_file);
    build_monitor_with(config, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, ConfigFormat};
    use crate::health::Outcome;
    use crate::recording::{append_record, Observation};
    use chrono::Utc;
    use std::io::Write;
    use std::path::Path;

    fn warm_config(metrics_file: &Path) -> MonitorConfig {
        let yaml = format!(
            r#"
service:
  base_url: "http://127.0.0.1:8000"
monitoring:
  request_timeout_seconds: 1
  check_interval_seconds: 1
  window_capacity: 10
  warm_start: true
logging:
  log_file: "{log}"
  metrics_file: "{metrics}"
thresholds:
  response_time_ms: {{ warning: 200, critical: 500 }}
  error_rate_percent: {{ warning: 5, critical: 10 }}
  consecutive_failures: {{ warning: 3, critical: 5 }}
"#,
            log = metrics_file.with_file_name("monitoring.log").display(),
            metrics = metrics_file.display(),
        );
        parse_config(&yaml, ConfigFormat::Yaml).unwrap()
    }

    fn success(latency_ms: f64) -> Observation {
        Observation {
            timestamp: Utc::now(),
            endpoint: "/health".into(),
            outcome: Outcome::Success { status_code: 200, latency_ms },
            consecutive_failures: 0,
            p95_latency_ms: latency_ms,
            error_rate_percent: 0.0,
        }
    }

    #[test]
    fn test_cold_start_ignores_metrics_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");
        append_record(&path, &success(10.0)).unwrap();

        let mut config = warm_config(&path);
        config.monitoring.warm_start = false;

        let state = initial_state(&config).unwrap();
        assert!(state.window.is_empty());
    }

    #[test]
    fn test_warm_start_after_interrupted_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");
        append_record(&path, &success(10.0)).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .unwrap()
            .write_all(br#"{"timestamp":"2026-10-19T08:3"#)
            .unwrap();
        append_record(&path, &success(20.0)).unwrap();

        let state = initial_state(&warm_config(&path)).unwrap();
        assert_eq!(state.window.iter().collect::<Vec<_>>(), vec![10.0, 20.0]);
        assert_eq!(state.counters.total_checks, 0);
    }
}
