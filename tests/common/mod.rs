//! Shared utilities for monitor integration tests.

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use health_monitor::config::{ThresholdBand, ThresholdConfig};
use health_monitor::health::{ProbeError, Sample, SampleSource, Severity};
use health_monitor::monitor::{AggregateSummary, LoopSettings, Reporter};
use health_monitor::recording::{Observation, SinkFailure};

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` decides the status code and body of every response.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut request = [0u8; 1024];
                        let _ = socket.read(&mut request).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            301 => "301 Moved Permanently",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// A sample source that replays a fixed script, optionally slowly.
#[allow(dead_code)]
pub struct ScriptedSource {
    script: VecDeque<Result<Sample, ProbeError>>,
    delay: Duration,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Result<Sample, ProbeError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl SampleSource for ScriptedSource {
    fn endpoint(&self) -> &str {
        "/health"
    }

    async fn check(&mut self) -> Result<Sample, ProbeError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.script
            .pop_front()
            .unwrap_or_else(|| Err(ProbeError::Transport("script exhausted".into())))
    }
}

#[allow(dead_code)]
pub fn ok(latency_ms: f64) -> Result<Sample, ProbeError> {
    Ok(Sample { status_code: 200, latency_ms })
}

#[allow(dead_code)]
pub fn refused() -> Result<Sample, ProbeError> {
    Err(ProbeError::Transport("connection refused".into()))
}

/// Collects everything the loop reports.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub started: bool,
    pub cycles: Vec<(Observation, Severity)>,
    pub aggregates: Vec<AggregateSummary>,
    pub sink_failures: usize,
    pub stopped: Option<Option<AggregateSummary>>,
}

#[allow(dead_code)]
impl RecordingReporter {
    pub fn severities(&self) -> Vec<Severity> {
        self.cycles.iter().map(|(_, severity)| *severity).collect()
    }

    pub fn streaks(&self) -> Vec<u32> {
        self.cycles.iter().map(|(o, _)| o.consecutive_failures).collect()
    }
}

impl Reporter for RecordingReporter {
    fn started(&mut self, _target: &str, _interval: Duration) {
        self.started = true;
    }

    fn cycle(&mut self, observation: &Observation, severity: Severity) {
        self.cycles.push((observation.clone(), severity));
    }

    fn aggregate(&mut self, summary: &AggregateSummary) {
        self.aggregates.push(*summary);
    }

    fn sink_failed(&mut self, _failure: &SinkFailure) {
        self.sink_failures += 1;
    }

    fn stopped(&mut self, summary: Option<&AggregateSummary>) {
        self.stopped = Some(summary.copied());
    }
}

#[allow(dead_code)]
pub fn thresholds() -> ThresholdConfig {
    ThresholdConfig {
        response_time_ms: ThresholdBand { warning: 200.0, critical: 500.0 },
        error_rate_percent: ThresholdBand { warning: 5.0, critical: 10.0 },
        consecutive_failures: ThresholdBand { warning: 3, critical: 5 },
    }
}

#[allow(dead_code)]
pub fn settings(interval: Duration, max_checks: Option<u64>) -> LoopSettings {
    LoopSettings {
        interval,
        summary_every: 5,
        max_checks,
        thresholds: thresholds(),
    }
}

/// YAML config pointing at `base_url`, with sinks under `dir`.
#[allow(dead_code)]
pub fn yaml_config(base_url: &str, dir: &Path, max_checks: u64) -> String {
    format!(
        r#"
service:
  base_url: "{base_url}"
monitoring:
  request_timeout_seconds: 2
  check_interval_seconds: 0.01
  max_checks: {max_checks}
logging:
  log_file: "{log}"
  metrics_file: "{metrics}"
thresholds:
  response_time_ms: {{ warning: 1000, critical: 2000 }}
  error_rate_percent: {{ warning: 40, critical: 60 }}
  consecutive_failures: {{ warning: 2, critical: 3 }}
"#,
        log = dir.join("logs/monitoring.log").display(),
        metrics = dir.join("logs/metrics.jsonl").display(),
    )
}
