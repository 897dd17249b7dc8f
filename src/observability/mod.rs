//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Monitor loop produces:
//!     → logging.rs (structured process log events on stderr)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stderr, JSON or human format)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Process logs go to stderr; stdout carries the console summary
//! - Metrics are cheap no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
