//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Probe (probe.rs):
//!     GET {base_url}{health_path} with timeout
//!     → Sample{status_code, latency_ms} or ProbeError
//!     → Outcome (outcome.rs)
//!
//! Rolling state:
//!     Outcome latency → window.rs (bounded FIFO, percentiles)
//!     Outcome         → counters.rs (totals, error rate, streak)
//!
//! Classification (severity.rs):
//!     latest latency + error rate + streak → NORMAL / WARNING / CRITICAL
//! ```
//!
//! # Design Decisions
//! - Window and counters are plain owned values, no interior mutability
//! - Classification is a pure function of the current state
//! - Each monitored target would own its own window and counters

pub mod counters;
pub mod outcome;
pub mod probe;
pub mod severity;
pub mod window;

pub use counters::Counters;
pub use outcome::Outcome;
pub use probe::{HttpProbe, ProbeError, Sample, SampleSource};
pub use severity::{classify, Severity};
pub use window::RollingWindow;
