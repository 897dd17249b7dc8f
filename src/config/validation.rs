//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, capacities > 0)
//! - Check that each warning threshold does not exceed its critical one
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::{MonitorConfig, ThresholdBand};

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.service.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "service.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("service.base_url", e.to_string())),
    }

    if !config.service.health_path.starts_with('/') {
        errors.push(ValidationError::new("service.health_path", "must start with '/'"));
    }

    check_positive_secs(
        &mut errors,
        "monitoring.request_timeout_seconds",
        config.monitoring.request_timeout_seconds,
    );
    check_positive_secs(
        &mut errors,
        "monitoring.check_interval_seconds",
        config.monitoring.check_interval_seconds,
    );

    if config.monitoring.window_capacity == 0 {
        errors.push(ValidationError::new("monitoring.window_capacity", "must be greater than 0"));
    }
    if config.monitoring.max_checks == Some(0) {
        errors.push(ValidationError::new("monitoring.max_checks", "must be greater than 0 when set"));
    }
    if config.monitoring.summary_every == 0 {
        errors.push(ValidationError::new("monitoring.summary_every", "must be greater than 0"));
    }

    if config.logging.log_file.as_os_str().is_empty() {
        errors.push(ValidationError::new("logging.log_file", "must not be empty"));
    }
    if config.logging.metrics_file.as_os_str().is_empty() {
        errors.push(ValidationError::new("logging.metrics_file", "must not be empty"));
    }

    let thresholds = &config.thresholds;
    check_band(&mut errors, "thresholds.response_time_ms", &thresholds.response_time_ms);
    check_band(&mut errors, "thresholds.error_rate_percent", &thresholds.error_rate_percent);
    let failures = thresholds.consecutive_failures;
    if failures.warning > failures.critical {
        errors.push(ValidationError::new(
            "thresholds.consecutive_failures",
            format!("warning ({}) exceeds critical ({})", failures.warning, failures.critical),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_positive_secs(errors: &mut Vec<ValidationError>, field: &str, value: f64) {
    // Upper bound keeps Duration::from_secs_f64 from panicking.
    if !value.is_finite() || value <= 0.0 || value > u32::MAX as f64 {
        errors.push(ValidationError::new(field, format!("must be a positive number of seconds, got {}", value)));
    }
}

fn check_band(errors: &mut Vec<ValidationError>, field: &str, band: &ThresholdBand<f64>) {
    if !band.warning.is_finite() || !band.critical.is_finite() {
        errors.push(ValidationError::new(field, "thresholds must be finite"));
    } else if band.warning > band.critical {
        errors.push(ValidationError::new(
            field,
            format!("warning ({}) exceeds critical ({})", band.warning, band.critical),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::*;

    fn valid() -> MonitorConfig {
        MonitorConfig {
            service: ServiceConfig {
                base_url: "http://127.0.0.1:8000".into(),
                health_path: "/health".into(),
            },
            monitoring: MonitoringConfig {
                request_timeout_seconds: 5.0,
                check_interval_seconds: 10.0,
                window_capacity: 100,
                summary_every: 5,
                max_checks: None,
                warm_start: false,
            },
            logging: LoggingConfig {
                log_file: "logs/monitoring.log".into(),
                metrics_file: "logs/metrics.jsonl".into(),
            },
            thresholds: ThresholdConfig {
                response_time_ms: ThresholdBand { warning: 200.0, critical: 500.0 },
                error_rate_percent: ThresholdBand { warning: 5.0, critical: 10.0 },
                consecutive_failures: ThresholdBand { warning: 3, critical: 5 },
            },
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_rejects_bad_url_and_scheme() {
        let mut config = valid();
        config.service.base_url = "not a url".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "service.base_url");

        config.service.base_url = "ftp://example.com".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].message.contains("ftp"));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = valid();
        config.service.health_path = "health".into();
        config.monitoring.check_interval_seconds = -1.0;
        config.monitoring.window_capacity = 0;
        config.thresholds.consecutive_failures = ThresholdBand { warning: 6, critical: 5 };
        config.thresholds.error_rate_percent.warning = f64::NAN;

        let fields: Vec<_> = validate_config(&config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(
            fields,
            vec![
                "service.health_path",
                "monitoring.check_interval_seconds",
                "monitoring.window_capacity",
                "thresholds.error_rate_percent",
                "thresholds.consecutive_failures",
            ]
        );
    }

    #[test]
    fn test_equal_warning_and_critical_allowed() {
        let mut config = valid();
        config.thresholds.response_time_ms = ThresholdBand { warning: 300.0, critical: 300.0 };
        assert!(validate_config(&config).is_ok());
    }
}
