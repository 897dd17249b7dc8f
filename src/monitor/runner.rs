//! The monitoring loop.
//!
//! # States
//! ```text
//! IDLE → CHECKING → RECORDING → SLEEPING → CHECKING → …
//!                                  │
//!            cancellation / budget └──→ STOPPED
//! ```
//!
//! # Design Decisions
//! - Cycles never overlap: the next check starts only after the sleep
//! - A check in flight always completes and is recorded before the loop
//!   looks at the shutdown signal
//! - Shutdown during the sleep ends the loop immediately
//! - Probe errors become observations; nothing in a cycle can end the loop

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::broadcast;
use tokio::time;

use crate::config::{MonitorConfig, ThresholdConfig};
use crate::health::{classify, Outcome, SampleSource, Severity};
use crate::lifecycle::shutdown::is_triggered;
use crate::monitor::report::{AggregateSummary, Reporter};
use crate::monitor::state::MonitorState;
use crate::observability::metrics;
use crate::recording::{Observation, Recorder};

/// Loop phase, for logging and inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Checking,
    Recording,
    Sleeping,
    Stopped,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Checking => "checking",
            Phase::Recording => "recording",
            Phase::Sleeping => "sleeping",
            Phase::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Timing and cadence settings lifted out of [`MonitorConfig`].
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub interval: Duration,
    pub summary_every: u64,
    pub max_checks: Option<u64>,
    pub thresholds: ThresholdConfig,
}

impl LoopSettings {
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self {
            interval: config.monitoring.check_interval(),
            summary_every: config.monitoring.summary_every.max(1),
            max_checks: config.monitoring.max_checks,
            thresholds: config.thresholds.clone(),
        }
    }
}

/// Drives one target: probe, update state, classify, record, sleep.
pub struct MonitorLoop<S, R> {
    source: S,
    recorder: Recorder,
    reporter: R,
    settings: LoopSettings,
    state: MonitorState,
    phase: Phase,
    last_severity: Option<Severity>,
}

impl<S: SampleSource, R: Reporter> MonitorLoop<S, R> {
    pub fn new(source: S, recorder: Recorder, reporter: R, settings: LoopSettings, state: MonitorState) -> Self {
        Self {
            source,
            recorder,
            reporter,
            settings,
            state,
            phase: Phase::Idle,
            last_severity: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Run until `shutdown` fires or the check budget is spent.
    ///
    /// Hands back the final state and the reporter once the final summary
    /// has been reported.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> (MonitorState, R) {
        tracing::info!(
            endpoint = self.source.endpoint(),
            interval_secs = self.settings.interval.as_secs_f64(),
            max_checks = ?self.settings.max_checks,
            "Monitor loop starting"
        );
        self.reporter.started(&self.source.target(), self.settings.interval);

        loop {
            if is_triggered(&mut shutdown) {
                tracing::info!("Shutdown requested before next check");
                break;
            }

            self.run_cycle().await;

            if self.budget_spent() {
                tracing::info!(total_checks = self.state.counters.total_checks, "Check budget reached");
                break;
            }

            self.transition(Phase::Sleeping);
            tokio::select! {
                _ = time::sleep(self.settings.interval) => {}
                _ = shutdown.recv() => {
                    tracing::info!("Monitor received shutdown signal while sleeping");
                    break;
                }
            }
        }

        self.transition(Phase::Stopped);
        let summary = AggregateSummary::from_state(&self.state);
        self.reporter.stopped(summary.as_ref());
        tracing::info!(
            total_checks = self.state.counters.total_checks,
            error_count = self.state.counters.error_count,
            "Monitor loop stopped"
        );

        (self.state, self.reporter)
    }

    /// Perform one full cycle and return what was recorded.
    pub async fn run_cycle(&mut self) -> (Observation, Severity) {
        self.transition(Phase::Checking);
        let timestamp = Utc::now();
        let result = self.source.check().await;
        if let Err(e) = &result {
            tracing::warn!(endpoint = self.source.endpoint(), error = %e, "Health check failed");
        }

        let outcome = Outcome::from(result);
        let observation = self.state.observe(timestamp, self.source.endpoint(), outcome);
        let severity = classify(
            self.state.window.latest(),
            observation.error_rate_percent,
            observation.consecutive_failures,
            &self.settings.thresholds,
        );
        self.note_severity(severity);

        self.transition(Phase::Recording);
        for failure in self.recorder.record(&observation) {
            tracing::warn!(sink = %failure.sink, error = %failure.error, "Failed to record observation");
            metrics::record_sink_failure(failure.sink);
            self.reporter.sink_failed(&failure);
        }
        metrics::record_observation(&observation, severity);
        self.reporter.cycle(&observation, severity);

        let total = self.state.counters.total_checks;
        if total % self.settings.summary_every == 0 {
            if let Some(summary) = AggregateSummary::from_state(&self.state) {
                self.reporter.aggregate(&summary);
            }
        }

        (observation, severity)
    }

    fn budget_spent(&self) -> bool {
        self.settings
            .max_checks
            .is_some_and(|max| self.state.counters.total_checks >= max)
    }

    fn transition(&mut self, next: Phase) {
        tracing::debug!(from = %self.phase, to = %next, "Monitor phase change");
        self.phase = next;
    }

    fn note_severity(&mut self, severity: Severity) {
        if self.last_severity == Some(severity) {
            return;
        }
        let previous = self.last_severity.replace(severity);
        let from = previous.map(|s| s.to_string()).unwrap_or_else(|| "none".to_string());
        match severity {
            Severity::Normal => tracing::info!(from = %from, to = %severity, "Severity changed"),
            Severity::Warning => tracing::warn!(from = %from, to = %severity, "Severity changed"),
            Severity::Critical => tracing::error!(from = %from, to = %severity, "Severity changed"),
        }
    }
}
