//! Durable observation recording.
//!
//! # Data Flow
//! ```text
//! Observation (observation.rs)
//!     → ObservationRecord (flat JSON shape)
//!     → recorder.rs → general log   (append, one line)
//!                   → metrics stream (append, one line)
//!
//! Startup / reporting:
//!     metrics stream → replay.rs → Vec<Observation>
//! ```
//!
//! # Design Decisions
//! - JSON lines, never a wrapping array: safe to tail, crash leaves at most
//!   one torn line
//! - Both sinks get the same record shape

pub mod observation;
pub mod recorder;
pub mod replay;

pub use observation::{Observation, ObservationRecord};
pub use recorder::{append_record, RecordError, Recorder, Sink, SinkFailure};
pub use replay::{read_records, recent_latencies};
