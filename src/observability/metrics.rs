//! Metrics collection and exposition.
//!
//! # Metrics
//! - `health_checks_total` (counter): checks by outcome (`healthy`, `unhealthy`, `error`)
//! - `health_check_latency_ms` (histogram): measured request latency
//! - `health_p95_latency_ms` (gauge): p95 of the rolling window
//! - `health_error_rate_percent` (gauge): cumulative error rate
//! - `health_consecutive_failures` (gauge): current failure streak
//! - `health_severity` (gauge): 0=normal, 1=warning, 2=critical
//! - `health_sink_write_failures_total` (counter): failed appends by sink

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::Severity;
use crate::recording::{Observation, Sink};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    describe_metrics();

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

fn describe_metrics() {
    metrics::describe_counter!("health_checks_total", "Health checks performed, by outcome");
    metrics::describe_histogram!("health_check_latency_ms", "Health check latency in milliseconds");
    metrics::describe_gauge!("health_p95_latency_ms", "p95 latency of the rolling window");
    metrics::describe_gauge!("health_error_rate_percent", "Cumulative error rate");
    metrics::describe_gauge!("health_consecutive_failures", "Current consecutive failure streak");
    metrics::describe_gauge!("health_severity", "0=normal, 1=warning, 2=critical");
    metrics::describe_counter!("health_sink_write_failures_total", "Failed sink appends, by sink");
}

/// Record one completed cycle.
pub fn record_observation(observation: &Observation, severity: Severity) {
    let label = match observation.outcome.latency_ms() {
        Some(_) if observation.success() => "healthy",
        Some(_) => "unhealthy",
        None => "error",
    };
    metrics::counter!("health_checks_total", "outcome" => label).increment(1);

    if let Some(latency_ms) = observation.outcome.latency_ms() {
        metrics::histogram!("health_check_latency_ms").record(latency_ms);
    }

    metrics::gauge!("health_p95_latency_ms").set(observation.p95_latency_ms);
    metrics::gauge!("health_error_rate_percent").set(observation.error_rate_percent);
    metrics::gauge!("health_consecutive_failures").set(observation.consecutive_failures as f64);
    metrics::gauge!("health_severity").set(severity.level() as f64);
}

/// Record a failed sink append.
pub fn record_sink_failure(sink: Sink) {
    metrics::counter!("health_sink_write_failures_total", "sink" => sink.to_string()).increment(1);
}
