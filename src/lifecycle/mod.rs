//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → probe + recorder + reporter → optional warm start
//!
//! Signals (signals.rs):
//!     SIGINT / SIGTERM → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → every subscriber's recv() resolves
//!     → monitor loop finishes its current cycle → STOPPED
//! ```
//!
//! # Design Decisions
//! - Cancellation is cooperative: the loop checks it between cycles and
//!   while sleeping, never mid-request
//! - Subscribe before spawning the signal task so no trigger is missed

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
