//! Console reporting.
//!
//! # Responsibilities
//! - Render one line per cycle, a periodic aggregate and a final block
//! - Surface sink write failures to the operator
//!
//! # Design Decisions
//! - Rendering is pure string formatting so it can be tested
//! - [`Reporter`] is the seam the loop talks to; the console is one impl

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::health::{Outcome, RollingWindow, Severity};
use crate::monitor::state::MonitorState;
use crate::recording::{Observation, SinkFailure};

/// Aggregate statistics over the rolling window and counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateSummary {
    pub mean_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub error_rate_percent: f64,
    pub total_checks: u64,
}

impl AggregateSummary {
    /// `None` until at least one latency has been measured.
    pub fn from_state(state: &MonitorState) -> Option<Self> {
        Self::from_parts(&state.window, state.counters.error_rate_percent(), state.counters.total_checks)
    }

    pub fn from_parts(window: &RollingWindow, error_rate_percent: f64, total_checks: u64) -> Option<Self> {
        if window.is_empty() {
            return None;
        }
        Some(Self {
            mean_latency_ms: window.mean(),
            p95_latency_ms: window.p95(),
            error_rate_percent,
            total_checks,
        })
    }
}

/// Receives human-facing events from the monitor loop.
pub trait Reporter {
    /// Called once before the first check.
    fn started(&mut self, _target: &str, _interval: Duration) {}

    /// Called after every recorded cycle.
    fn cycle(&mut self, observation: &Observation, severity: Severity);

    /// Called every N checks.
    fn aggregate(&mut self, summary: &AggregateSummary);

    /// Called when one sink could not be written.
    fn sink_failed(&mut self, _failure: &SinkFailure) {}

    /// Called once when the loop stops.
    fn stopped(&mut self, summary: Option<&AggregateSummary>);
}

/// Prints to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    log_file: PathBuf,
    metrics_file: PathBuf,
}

impl ConsoleReporter {
    pub fn new(log_file: &Path, metrics_file: &Path) -> Self {
        Self {
            log_file: log_file.to_path_buf(),
            metrics_file: metrics_file.to_path_buf(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn started(&mut self, target: &str, interval: Duration) {
        println!("🚀 Health monitor starting");
        println!("🎯 Target:   {}", target);
        println!("📊 Interval: {:.1}s", interval.as_secs_f64());
        println!("📁 Log:      {}", self.log_file.display());
        println!("📈 Metrics:  {}", self.metrics_file.display());
        println!("Press Ctrl+C to stop\n");
    }

    fn cycle(&mut self, observation: &Observation, severity: Severity) {
        println!("{}", format_cycle_line(observation, severity));
    }

    fn aggregate(&mut self, summary: &AggregateSummary) {
        println!("{}", format_aggregate(summary));
    }

    fn sink_failed(&mut self, failure: &SinkFailure) {
        println!("⚠️  Could not write {} sink: {}", failure.sink, failure.error);
    }

    fn stopped(&mut self, summary: Option<&AggregateSummary>) {
        println!("\n🛑 Monitoring stopped");
        match summary {
            Some(summary) => println!("{}", format_final(summary, &self.log_file, &self.metrics_file)),
            None => println!("No latency samples were collected"),
        }
    }
}

/// `🟢 NORMAL [08:30:00] /health 200 | 48.31ms | P95: 61.20ms | Errors: 0.00% | Failures: 0`
pub fn format_cycle_line(observation: &Observation, severity: Severity) -> String {
    let head = format!(
        "{} {} [{}] {}",
        severity.marker(),
        severity,
        observation.timestamp.format("%H:%M:%S"),
        observation.endpoint
    );
    let tail = format!(
        "P95: {:.2}ms | Errors: {:.2}% | Failures: {}",
        observation.p95_latency_ms, observation.error_rate_percent, observation.consecutive_failures
    );

    match &observation.outcome {
        Outcome::Success { status_code, latency_ms } => {
            format!("{} {} | {:.2}ms | {}", head, status_code, latency_ms, tail)
        }
        Outcome::Failure { error } => format!("{} ERROR: {} | {}", head, error, tail),
    }
}

/// `📊 SUMMARY: Avg: 52.10ms | P95: 61.20ms | Errors: 0.00% | Total: 5`
pub fn format_aggregate(summary: &AggregateSummary) -> String {
    format!(
        "📊 SUMMARY: Avg: {:.2}ms | P95: {:.2}ms | Errors: {:.2}% | Total: {}",
        summary.mean_latency_ms, summary.p95_latency_ms, summary.error_rate_percent, summary.total_checks
    )
}

/// Multi-line block printed on shutdown.
pub fn format_final(summary: &AggregateSummary, log_file: &Path, metrics_file: &Path) -> String {
    format!(
        "📈 FINAL STATISTICS:\n   Mean latency: {:.2}ms\n   P95 latency:  {:.2}ms\n   Error rate:   {:.2}%\n   Total checks: {}\n   Log file:     {}\n   Metrics file: {}",
        summary.mean_latency_ms,
        summary.p95_latency_ms,
        summary.error_rate_percent,
        summary.total_checks,
        log_file.display(),
        metrics_file.display()
    )
}
