//! Observation record and its line format.
//!
//! One observation serializes to one compact JSON object:
//!
//! ```text
//! {"timestamp":"…","endpoint":"/health","status_code":200,"response_time_ms":48.31,
//!  "success":true,"consecutive_failures":0,"p95_latency":61.2,"error_rate":0.0}
//! {"timestamp":"…","endpoint":"/health","error":"transport error: …",
//!  "success":false,"consecutive_failures":1,"p95_latency":61.2,"error_rate":16.67}
//! ```
//!
//! `status_code`/`response_time_ms` and `error` are mutually exclusive.
//! Latency, p95 and error rate are rounded to two decimals on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::health::{Counters, Outcome, RollingWindow};

/// One health-check cycle, with its derived figures frozen at check time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ObservationRecord", try_from = "ObservationRecord")]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub outcome: Outcome,
    /// Streak after this outcome was counted.
    pub consecutive_failures: u32,
    /// p95 of the window after this sample was appended.
    pub p95_latency_ms: f64,
    /// Error rate after this outcome was counted.
    pub error_rate_percent: f64,
}

impl Observation {
    /// Snapshot the post-update window and counters for `outcome`.
    pub fn capture(
        timestamp: DateTime<Utc>,
        endpoint: &str,
        outcome: Outcome,
        window: &RollingWindow,
        counters: &Counters,
    ) -> Self {
        Self {
            timestamp,
            endpoint: endpoint.to_string(),
            outcome,
            consecutive_failures: counters.consecutive_failures,
            p95_latency_ms: window.p95(),
            error_rate_percent: counters.error_rate_percent(),
        }
    }

    pub fn success(&self) -> bool {
        self.outcome.is_healthy()
    }
}

/// Flat on-disk shape of an [`Observation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub success: bool,
    pub consecutive_failures: u32,
    pub p95_latency: f64,
    pub error_rate: f64,
}

/// A record that carries both or neither outcome shapes.
#[derive(Debug, Error)]
pub enum RecordShapeError {
    #[error("record has both a response and an error")]
    Ambiguous,
    #[error("record has neither a response nor an error")]
    Empty,
}

impl From<Observation> for ObservationRecord {
    fn from(observation: Observation) -> Self {
        let success = observation.success();
        let (status_code, response_time_ms, error) = match observation.outcome {
            Outcome::Success { status_code, latency_ms } => {
                (Some(status_code), Some(round2(latency_ms)), None)
            }
            Outcome::Failure { error } => (None, None, Some(error)),
        };

        Self {
            timestamp: observation.timestamp,
            endpoint: observation.endpoint,
            status_code,
            response_time_ms,
            error,
            success,
            consecutive_failures: observation.consecutive_failures,
            p95_latency: round2(observation.p95_latency_ms),
            error_rate: round2(observation.error_rate_percent),
        }
    }
}

impl TryFrom<ObservationRecord> for Observation {
    type Error = RecordShapeError;

    fn try_from(record: ObservationRecord) -> Result<Self, Self::Error> {
        let outcome = match (record.status_code, record.response_time_ms, record.error) {
            (Some(status_code), Some(latency_ms), None) => Outcome::Success { status_code, latency_ms },
            (None, None, Some(error)) => Outcome::Failure { error },
            (None, None, None) => return Err(RecordShapeError::Empty),
            _ => return Err(RecordShapeError::Ambiguous),
        };

        Ok(Self {
            timestamp: record.timestamp,
            endpoint: record.endpoint,
            outcome,
            consecutive_failures: record.consecutive_failures,
            p95_latency_ms: record.p95_latency,
            error_rate_percent: record.error_rate,
        })
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
