//! Service health monitor library.
//!
//! Polls one HTTP health endpoint, keeps a rolling latency window, derives
//! p95 / error rate / failure streak, classifies severity, and appends every
//! observation to two JSON-lines sinks.

pub mod config;
pub mod health;
pub mod lifecycle;
pub mod monitor;
pub mod observability;
pub mod recording;

pub use config::schema::MonitorConfig;
pub use lifecycle::Shutdown;
pub use monitor::MonitorLoop;
