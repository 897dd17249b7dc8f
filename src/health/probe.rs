//! Health probe transport.
//!
//! # Responsibilities
//! - Issue one GET against the configured health endpoint
//! - Measure wall-clock latency of the request
//! - Convert timeouts and connection errors into [`ProbeError`]
//!
//! # Design Decisions
//! - The probe never retries; one call is one check
//! - Any status code is a completed request; judging it is the caller's job
//! - System proxies are bypassed so the check measures the target itself
//! - The reqwest timeout is backed by a tokio timeout so a check can never
//!   outlive its budget

use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::time;
use url::Url;

use crate::config::ServiceConfig;

/// A completed request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub status_code: u16,
    pub latency_ms: f64,
}

/// Errors that prevent a check from producing a response.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// No response within the request timeout.
    #[error("request timed out after {0}s")]
    Timeout(f64),

    /// Connection refused, DNS failure, reset, and the like.
    #[error("transport error: {0}")]
    Transport(String),

    /// The health URL could not be built from the configuration.
    #[error("invalid health URL: {0}")]
    InvalidUrl(String),
}

/// Anything that can perform one health check.
pub trait SampleSource {
    /// Path reported on each observation.
    fn endpoint(&self) -> &str;

    /// Human-readable description of what is being checked.
    fn target(&self) -> String {
        self.endpoint().to_string()
    }

    /// Perform one check, bounded by the source's timeout.
    fn check(&mut self) -> impl Future<Output = Result<Sample, ProbeError>> + Send;
}

/// HTTP health probe backed by reqwest.
pub struct HttpProbe {
    client: reqwest::Client,
    url: Url,
    endpoint: String,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(service: &ServiceConfig, timeout: Duration) -> Result<Self, ProbeError> {
        let raw = format!(
            "{}{}",
            service.base_url.trim_end_matches('/'),
            service.health_path
        );
        let url = Url::parse(&raw).map_err(|e| ProbeError::InvalidUrl(format!("{}: {}", raw, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .user_agent(concat!("health-monitor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProbeError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url,
            endpoint: service.health_path.clone(),
            timeout,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl SampleSource for HttpProbe {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn target(&self) -> String {
        self.url.to_string()
    }

    async fn check(&mut self) -> Result<Sample, ProbeError> {
        let started = Instant::now();
        let request = self.client.get(self.url.clone()).send();

        let response = match time::timeout(self.timeout, request).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if e.is_timeout() => {
                return Err(ProbeError::Timeout(self.timeout.as_secs_f64()));
            }
            Ok(Err(e)) => return Err(ProbeError::Transport(e.to_string())),
            Err(_) => return Err(ProbeError::Timeout(self.timeout.as_secs_f64())),
        };

        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
        let status_code = response.status().as_u16();
        tracing::trace!(url = %self.url, status_code, latency_ms, "Probe completed");

        Ok(Sample {
            status_code,
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(base_url: &str) -> ServiceConfig {
        ServiceConfig {
            base_url: base_url.into(),
            health_path: "/health".into(),
        }
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let probe = HttpProbe::new(&service("http://localhost:8000/"), Duration::from_secs(1)).unwrap();
        assert_eq!(probe.url().as_str(), "http://localhost:8000/health");
        assert_eq!(probe.endpoint(), "/health");

        let probe = HttpProbe::new(&service("http://localhost:8000/api"), Duration::from_secs(1)).unwrap();
        assert_eq!(probe.url().as_str(), "http://localhost:8000/api/health");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpProbe::new(&service("::nope"), Duration::from_secs(1)).err().unwrap();
        assert!(matches!(err, ProbeError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut probe = HttpProbe::new(&service(&format!("http://{}", addr)), Duration::from_secs(2)).unwrap();
        let err = probe.check().await.unwrap_err();
        assert!(matches!(err, ProbeError::Transport(_)), "got {:?}", err);
    }
}
