//! Monitoring loop subsystem.
//!
//! # Data Flow
//! ```text
//! timer tick
//!     → SampleSource::check (health::probe)
//!     → MonitorState (window + counters, state.rs)
//!     → classify (health::severity)
//!     → Recorder (both sinks) + Reporter (console, report.rs)
//!     → sleep, or stop on shutdown
//! ```
//!
//! # Design Decisions
//! - Single task, strictly sequential cycles
//! - State is owned by the loop and returned when it stops

pub mod report;
pub mod runner;
pub mod state;

pub use report::{AggregateSummary, ConsoleReporter, Reporter};
pub use runner::{LoopSettings, MonitorLoop, Phase};
pub use state::MonitorState;
