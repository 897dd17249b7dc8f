//! Result of a single health check.

use crate::health::probe::{ProbeError, Sample};

/// Status code that counts as a healthy response. Anything else, redirects
/// included, is a failure.
pub const HEALTHY_STATUS: u16 = 200;

/// What one check produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The request completed with some status code.
    Success { status_code: u16, latency_ms: f64 },
    /// The request never produced a response.
    Failure { error: String },
}

impl Outcome {
    /// True only for a completed request with status 200.
    pub fn is_healthy(&self) -> bool {
        matches!(self, Outcome::Success { status_code, .. } if *status_code == HEALTHY_STATUS)
    }

    /// Measured latency; transport failures have none.
    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            Outcome::Success { latency_ms, .. } => Some(*latency_ms),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Outcome::Success { status_code, .. } => Some(*status_code),
            Outcome::Failure { .. } => None,
        }
    }
}

impl From<Result<Sample, ProbeError>> for Outcome {
    fn from(result: Result<Sample, ProbeError>) -> Self {
        match result {
            Ok(sample) => Outcome::Success {
                status_code: sample.status_code,
                latency_ms: sample.latency_ms,
            },
            Err(e) => Outcome::Failure { error: e.to_string() },
        }
    }
}
